use crate::window::DisplayWindow;

/// Visual state of the word being typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum WordState {
    Still,
    Correct,
    Wrong,
}

/// `Correct` while `buffer` is still a prefix of `target`, `Wrong` otherwise.
pub fn classify(buffer: &str, target: &str) -> WordState {
    if target.starts_with(buffer) {
        WordState::Correct
    } else {
        WordState::Wrong
    }
}

/// Live feedback for a changed input buffer. Does nothing once the words
/// are used up.
pub fn evaluate(
    buffer: &str,
    words: &[String],
    current_index: usize,
    window: &mut DisplayWindow,
) -> Option<WordState> {
    let target = words.get(current_index)?;
    let state = classify(buffer, target);
    window.style_current(state);
    Some(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_prefix_is_correct() {
        let target = "mountain";
        for end in 0..=target.len() {
            assert_eq!(classify(&target[..end], target), WordState::Correct);
        }
    }

    #[test]
    fn test_non_prefixes_are_wrong() {
        assert_eq!(classify("x", "catch"), WordState::Wrong);
        assert_eq!(classify("cta", "catch"), WordState::Wrong);
        assert_eq!(classify("catches", "catch"), WordState::Wrong);
        assert_eq!(classify("Catch", "catch"), WordState::Wrong);
        assert_eq!(classify(" ", "catch"), WordState::Wrong);
    }

    #[test]
    fn test_empty_target() {
        assert_eq!(classify("", ""), WordState::Correct);
        assert_eq!(classify("a", ""), WordState::Wrong);
    }

    #[test]
    fn test_evaluate_styles_current_unit() {
        let words = vec!["hi".to_string(), "mark".to_string()];
        let mut window = DisplayWindow::new(18);
        window.render(&words, 0);

        assert_eq!(evaluate("h", &words, 0, &mut window), Some(WordState::Correct));
        assert!(window.units()[0].tags.correct);

        assert_eq!(evaluate("hx", &words, 0, &mut window), Some(WordState::Wrong));
        assert!(window.units()[0].tags.wrong);
        assert!(!window.units()[0].tags.correct);
    }

    #[test]
    fn test_evaluate_without_target() {
        let words: Vec<String> = vec![];
        let mut window = DisplayWindow::new(18);
        window.render(&words, 0);

        assert_eq!(evaluate("abc", &words, 0, &mut window), None);
    }

    #[test]
    fn test_word_state_display() {
        assert_eq!(WordState::Still.to_string(), "still");
        assert_eq!(WordState::Wrong.to_string(), "wrong");
    }
}
