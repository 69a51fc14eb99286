use std::time::Duration;
use tracing::{debug, info};

use crate::evaluator::{self, WordState};
use crate::progression::{self, Outcome, SessionState};
use crate::result::SessionResult;
use crate::timer::{format_remaining, Countdown, CountdownEvent, TimerState};
use crate::window::DisplayWindow;
use crate::word_source::{fetch_or_empty, WordSource};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub duration: Duration,
    pub tick_interval: Duration,
    pub window_size: usize,
    pub delimiter: char,
    /// Hold the countdown until the first keystroke
    pub deferred_start: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(60),
            tick_interval: Duration::from_secs(1),
            window_size: 18,
            delimiter: ' ',
            deferred_start: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the word list
    Loading,
    Typing,
    Finished,
}

/// Owns everything that lives for one typing session and replaces it
/// wholesale on restart.
#[derive(Debug)]
pub struct SessionController {
    config: SessionConfig,
    generation: u64,
    phase: Phase,
    words: Vec<String>,
    state: SessionState,
    window: DisplayWindow,
    buffer: String,
    countdown: Countdown,
    countdown_text: String,
    result: Option<SessionResult>,
}

impl SessionController {
    pub fn new(config: SessionConfig) -> Self {
        let window = DisplayWindow::new(config.window_size);
        let countdown = Countdown::new(config.duration, config.tick_interval);
        let countdown_text = format_remaining(countdown.remaining_ms());
        Self {
            config,
            generation: 0,
            phase: Phase::Loading,
            words: Vec::new(),
            state: SessionState::default(),
            window,
            buffer: String::new(),
            countdown,
            countdown_text,
            result: None,
        }
    }

    /// Tears down the running session and waits for a new word list.
    /// Returns the generation the words must be delivered with.
    pub fn begin(&mut self) -> u64 {
        // stop first so no tick of the old countdown lands on the new state
        self.countdown.stop();

        self.generation += 1;
        self.phase = Phase::Loading;
        self.words.clear();
        self.state = SessionState::default();
        self.window.clear();
        self.buffer.clear();
        self.countdown = Countdown::new(self.config.duration, self.config.tick_interval);
        self.countdown_text = format_remaining(self.countdown.remaining_ms());
        self.result = None;

        debug!(generation = self.generation, "session reset");
        self.generation
    }

    /// Installs the words for `generation` and opens the session for
    /// typing. Words for any older generation are dropped and `false` is
    /// returned.
    pub fn load(&mut self, generation: u64, words: Vec<String>, now: Duration) -> bool {
        if generation != self.generation || self.phase != Phase::Loading {
            debug!(
                generation,
                current = self.generation,
                "discarding stale word list"
            );
            return false;
        }

        info!(generation, words = words.len(), "session started");
        self.words = words;
        self.window.render(&self.words, 0);
        self.phase = Phase::Typing;
        if !self.config.deferred_start {
            self.start_countdown(now);
        }
        self.window.style_current(WordState::Still);
        true
    }

    /// `begin` and `load` in one go, fetching on the calling thread.
    pub fn start_with(&mut self, source: &dyn WordSource, now: Duration) {
        let generation = self.begin();
        let words = fetch_or_empty(source);
        self.load(generation, words, now);
    }

    /// A typed character. The delimiter commits the current word and is
    /// never added to the buffer.
    pub fn handle_char(&mut self, c: char, now: Duration) -> Option<Outcome> {
        if self.phase != Phase::Typing {
            return None;
        }
        self.start_countdown(now);

        if c == self.config.delimiter {
            return self.advance();
        }

        self.buffer.push(c);
        self.evaluate();
        None
    }

    pub fn backspace(&mut self) {
        if self.phase != Phase::Typing {
            return;
        }
        if self.buffer.pop().is_some() {
            self.evaluate();
        }
    }

    pub fn advance(&mut self) -> Option<Outcome> {
        progression::advance(
            &mut self.state,
            &mut self.buffer,
            &self.words,
            &mut self.window,
        )
    }

    fn evaluate(&mut self) -> Option<WordState> {
        evaluator::evaluate(
            &self.buffer,
            &self.words,
            self.state.current_index,
            &mut self.window,
        )
    }

    fn start_countdown(&mut self, now: Duration) {
        if let Some(event) = self.countdown.start(now) {
            self.apply_countdown_event(event);
        }
    }

    /// Drives the countdown. Returns `true` if the session finished during
    /// this call.
    pub fn poll_timer(&mut self, now: Duration) -> bool {
        let mut finished = false;
        for event in self.countdown.poll(now) {
            finished |= self.apply_countdown_event(event);
        }
        finished
    }

    fn apply_countdown_event(&mut self, event: CountdownEvent) -> bool {
        match event {
            CountdownEvent::Update(remaining_ms) => {
                self.countdown_text = format_remaining(remaining_ms);
                false
            }
            CountdownEvent::Completed => {
                let result = SessionResult::new(
                    self.state.correct_count,
                    self.state.current_index,
                    self.config.duration,
                );
                info!(
                    wpm = result.wpm(),
                    correct = result.correct,
                    attempted = result.attempted,
                    "session finished"
                );
                self.result = Some(result);
                self.phase = Phase::Finished;
                true
            }
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn window(&self) -> &DisplayWindow {
        &self.window
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn target_word(&self) -> Option<&str> {
        self.words.get(self.state.current_index).map(String::as_str)
    }

    pub fn countdown_text(&self) -> &str {
        &self.countdown_text
    }

    pub fn timer_state(&self) -> TimerState {
        self.countdown.state()
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }
}
