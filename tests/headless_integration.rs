use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use wordsprint::app::App;
use wordsprint::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use wordsprint::session::{Phase, SessionConfig};
use wordsprint::timer::ManualClock;
use wordsprint::word_source::StaticWordSource;

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn headless_app(
    prompt: &str,
    config: SessionConfig,
) -> (App, Runner<TestEventSource, FixedTicker>, ManualClock) {
    let (es, _tx) = TestEventSource::new();
    let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(5)));
    let clock = ManualClock::new();
    let app = App::new(
        config,
        Arc::new(StaticWordSource::from_prompt(prompt)),
        Box::new(clock.clone()),
        runner.sender(),
    );
    (app, runner, clock)
}

/// Steps the runner until the fetched words have been installed.
fn wait_for_words(app: &mut App, runner: &Runner<TestEventSource, FixedTicker>) {
    for _ in 0..1000u32 {
        app.handle_event(runner.step());
        if app.session.phase() == Phase::Typing {
            return;
        }
    }
    panic!("words never arrived");
}

// Headless integration using the internal runtime without a TTY.
// Verifies that a full typing flow completes via Runner/TestEventSource.
#[test]
fn headless_typing_flow_completes() {
    let (mut app, runner, clock) = headless_app("hi stupid mark", SessionConfig::default());
    app.restart();
    wait_for_words(&mut app, &runner);

    let tx = runner.sender();
    for c in "hi stupd mark ".chars() {
        tx.send(key(c)).unwrap();
    }
    for _ in 0..100u32 {
        match runner.step() {
            AppEvent::Tick => break,
            event => app.handle_event(event),
        }
    }

    assert_eq!(app.session.state().current_index, 3);
    assert_eq!(app.session.state().correct_count, 2);

    clock.advance(Duration::from_secs(60));
    app.handle_event(runner.step());

    assert_eq!(app.session.phase(), Phase::Finished);
    let result = app.session.result().unwrap();
    assert_eq!(result.headline(), "2 WPM");
}

#[test]
fn headless_timed_session_finishes_by_time() {
    let config = SessionConfig {
        duration: Duration::from_millis(200),
        tick_interval: Duration::from_millis(50),
        deferred_start: false,
        ..SessionConfig::default()
    };
    let (mut app, runner, clock) = headless_app("hello", config);
    app.restart();
    wait_for_words(&mut app, &runner);

    for _ in 0..10u32 {
        clock.advance(Duration::from_millis(50));
        app.handle_event(runner.step());
        if app.session.phase() == Phase::Finished {
            break;
        }
    }

    assert_eq!(app.session.phase(), Phase::Finished);
    assert_eq!(app.session.result().map(|r| r.correct), Some(0));
}

#[test]
fn headless_restart_mid_fetch_keeps_newest_words() {
    let (mut app, runner, _clock) = headless_app("one two", SessionConfig::default());
    let tx = runner.sender();

    let stale = app.session.begin();
    app.restart();
    // a response for the superseded session shows up late
    tx.send(AppEvent::Words {
        generation: stale,
        words: vec!["stale".into()],
    })
    .unwrap();

    wait_for_words(&mut app, &runner);

    assert_eq!(app.session.words(), ["one".to_string(), "two".to_string()]);
}
