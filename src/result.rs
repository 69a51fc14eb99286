use std::time::Duration;

/// Final score of a finished session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionResult {
    pub correct: usize,
    pub attempted: usize,
    pub duration: Duration,
}

impl SessionResult {
    pub fn new(correct: usize, attempted: usize, duration: Duration) -> Self {
        Self {
            correct,
            attempted,
            duration,
        }
    }

    /// Correct words per minute. For the standard one-minute test this is
    /// the correct word count itself.
    pub fn wpm(&self) -> usize {
        if self.duration.is_zero() {
            return self.correct;
        }
        ((self.correct as f64 * 60.0) / self.duration.as_secs_f64()).round() as usize
    }

    /// Share of committed words typed correctly, in percent.
    pub fn accuracy(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        ((self.correct as f64 / self.attempted as f64) * 100.0).round()
    }

    pub fn headline(&self) -> String {
        format!("{} WPM", self.wpm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_minute_wpm_is_count() {
        let result = SessionResult::new(42, 50, Duration::from_secs(60));
        assert_eq!(result.wpm(), 42);
        assert_eq!(result.headline(), "42 WPM");
    }

    #[test]
    fn test_wpm_scales_with_duration() {
        assert_eq!(SessionResult::new(15, 20, Duration::from_secs(30)).wpm(), 30);
        assert_eq!(SessionResult::new(90, 100, Duration::from_secs(120)).wpm(), 45);
    }

    #[test]
    fn test_zero_duration_falls_back_to_count() {
        assert_eq!(SessionResult::new(3, 3, Duration::ZERO).wpm(), 3);
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(SessionResult::new(3, 5, Duration::from_secs(60)).accuracy(), 60.0);
        assert_eq!(SessionResult::new(0, 0, Duration::from_secs(60)).accuracy(), 0.0);
    }
}
