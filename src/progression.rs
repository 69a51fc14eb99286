use crate::evaluator::WordState;
use crate::window::DisplayWindow;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Position and tally of a running session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub current_index: usize,
    pub correct_count: usize,
}

/// Commits the buffer as the typed form of the current word and moves on
/// to the next one. The finished word keeps its correct/wrong tag.
///
/// Returns `None` without touching anything when there is no word left to
/// commit.
pub fn advance(
    state: &mut SessionState,
    buffer: &mut String,
    words: &[String],
    window: &mut DisplayWindow,
) -> Option<Outcome> {
    let target = words.get(state.current_index)?;

    let outcome = if *buffer == *target {
        state.correct_count += 1;
        window.style_current(WordState::Correct);
        Outcome::Correct
    } else {
        window.style_current(WordState::Wrong);
        Outcome::Incorrect
    };

    buffer.clear();
    state.current_index += 1;
    if window.advance_cursor() {
        window.render(words, state.current_index);
    }
    window.style_current(WordState::Still);

    debug_assert_eq!(window.absolute_index(), state.current_index);
    Some(outcome)
}
