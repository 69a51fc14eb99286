pub mod screen;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    evaluator::{classify, WordState},
    window::{WordTags, WordUnit},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.session.phase()).render(self, area, buf);
    }
}

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold_style() -> Style {
    bold_style().add_modifier(Modifier::DIM)
}

fn word_style(tags: WordTags) -> Style {
    let style = if tags.wrong {
        bold_style().fg(Color::Red)
    } else if tags.correct {
        bold_style().fg(Color::Green)
    } else {
        dim_bold_style()
    };

    if tags.current {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

/// Lines needed to show `units` separated by single spaces in `width` columns.
fn occupied_lines(units: &[WordUnit], width: u16) -> u16 {
    let width = width.max(1) as usize;
    let mut lines = 0u16;
    let mut used = 0usize;

    for unit in units {
        let w = unit.text.width().min(width);
        if lines == 0 || used + 1 + w > width {
            lines += 1;
            used = w;
        } else {
            used += 1 + w;
        }
    }

    lines
}

pub(crate) fn render_loading(area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        "loading words...",
        dim_bold_style().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);
}

pub(crate) fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let units = session.window().units();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
    let prompt_lines = occupied_lines(units, max_chars_per_line).max(1);
    let padding = area.height.saturating_sub(prompt_lines + 4) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(padding),
            Constraint::Length(2),
            Constraint::Length(prompt_lines),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(session.countdown_text(), dim_bold_style()))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    if units.is_empty() {
        Paragraph::new(Span::styled(
            "no words to type - (tab) to try again",
            bold_style().fg(Color::Yellow),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    } else {
        let spans = units
            .iter()
            .map(|unit| Span::styled(unit.text.as_str(), word_style(unit.tags)))
            .interleave_shortest(std::iter::repeat(Span::raw(" ")))
            .collect_vec();

        Paragraph::new(Line::from(spans))
            .alignment(if prompt_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);
    }

    let input_style = match session.target_word().map(|t| classify(session.buffer(), t)) {
        Some(WordState::Wrong) => bold_style().fg(Color::Red),
        _ => bold_style(),
    };
    Paragraph::new(Line::from(vec![
        Span::styled("> ", dim_bold_style()),
        Span::styled(session.buffer(), input_style),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);
}

pub(crate) fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(result) = app.session.result() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        result.headline(),
        bold_style().fg(Color::Magenta),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!(
            "{}/{} words   {}% acc",
            result.correct,
            result.attempted,
            result.accuracy()
        ),
        bold_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    let legend = ["(r)etry", "(tab) new words", "(esc)ape"].iter().join(" / ");
    Paragraph::new(Span::styled(
        legend,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[5], buf);
}
