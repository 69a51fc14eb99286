use ratatui::{buffer::Buffer, layout::Rect};

use crate::{
    app::App,
    session::Phase,
    ui::{render_loading, render_results, render_typing},
};

/// A UI Screen boundary: responsible for rendering one phase of a session
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Shown while the word list is being fetched
pub struct LoadingScreen;

impl Screen for LoadingScreen {
    fn render(&self, _app: &App, area: Rect, buf: &mut Buffer) {
        render_loading(area, buf);
    }
}

/// Countdown, word window and input line
pub struct TypingScreen;

impl Screen for TypingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_typing(app, area, buf);
    }
}

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_results(app, area, buf);
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Loading => Box::new(LoadingScreen),
        Phase::Typing => Box::new(TypingScreen),
        Phase::Finished => Box::new(ResultsScreen),
    }
}
