use std::sync::mpsc::Sender;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::runtime::AppEvent;
use crate::session::{Phase, SessionConfig, SessionController};
use crate::timer::Clock;
use crate::word_source::{spawn_fetch, WordSource};

/// Terminal front end around one [`SessionController`]. Words are fetched
/// on a worker thread and arrive as [`AppEvent::Words`].
pub struct App {
    pub session: SessionController,
    source: Arc<dyn WordSource>,
    clock: Box<dyn Clock>,
    events: Sender<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: SessionConfig,
        source: Arc<dyn WordSource>,
        clock: Box<dyn Clock>,
        events: Sender<AppEvent>,
    ) -> Self {
        Self {
            session: SessionController::new(config),
            source,
            clock,
            events,
            should_quit: false,
        }
    }

    /// Starts a fresh session; any earlier one is superseded immediately.
    pub fn restart(&mut self) {
        let generation = self.session.begin();
        spawn_fetch(Arc::clone(&self.source), generation, self.events.clone());
    }

    /// Starts a fresh session over the words just typed, without a fetch.
    pub fn retry(&mut self) {
        let words = self.session.words().to_vec();
        let generation = self.session.begin();
        self.session.load(generation, words, self.clock.now());
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        let now = self.clock.now();
        match event {
            AppEvent::Tick | AppEvent::Resize => {}
            AppEvent::Words { generation, words } => {
                self.session.load(generation, words, now);
            }
            AppEvent::Key(key) => self.on_key(key),
        }
        self.session.poll_timer(self.clock.now());
    }

    fn on_key(&mut self, key: KeyEvent) {
        let now = self.clock.now();
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Tab => self.restart(),
            KeyCode::Backspace => self.session.backspace(),
            KeyCode::Char(_)
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(c) => match self.session.phase() {
                Phase::Typing => {
                    self.session.handle_char(c, now);
                }
                Phase::Finished if c == 'r' => self.retry(),
                Phase::Finished | Phase::Loading => {}
            },
            _ => {}
        }
    }
}
