use crate::evaluator::WordState;

/// Tags carried by a rendered word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordTags {
    pub current: bool,
    pub correct: bool,
    pub wrong: bool,
}

/// One rendered word
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordUnit {
    pub text: String,
    pub tags: WordTags,
}

impl WordUnit {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            tags: WordTags::default(),
        }
    }
}

/// The slice of the word sequence currently on screen.
///
/// The word the user is on lives at `cursor` inside the window and at
/// `window_start + cursor` in the full sequence.
#[derive(Clone, Debug)]
pub struct DisplayWindow {
    capacity: usize,
    window_start: usize,
    cursor: usize,
    units: Vec<WordUnit>,
}

impl DisplayWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            window_start: 0,
            cursor: 0,
            units: Vec::new(),
        }
    }

    /// Replaces the window with `words[from..from + min(N, remaining)]` and
    /// moves the cursor back to its first unit.
    pub fn render(&mut self, words: &[String], from: usize) {
        let from = from.min(words.len());
        let end = words.len().min(from + self.capacity);

        self.units.clear();
        self.units
            .extend(words[from..end].iter().map(|w| WordUnit::new(w)));
        self.window_start = from;
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.units.clear();
        self.window_start = 0;
        self.cursor = 0;
    }

    /// Moves the cursor to the next unit. Returns `true` when the cursor hit
    /// the capacity and the window needs a re-render.
    pub fn advance_cursor(&mut self) -> bool {
        self.cursor += 1;
        self.cursor >= self.capacity
    }

    /// Marks the unit at the cursor as current with the given correctness
    /// and takes the current mark off the unit before it.
    pub fn style_current(&mut self, state: WordState) {
        if let Some(prev) = self
            .cursor
            .checked_sub(1)
            .and_then(|idx| self.units.get_mut(idx))
        {
            prev.tags.current = false;
        }

        let Some(unit) = self.units.get_mut(self.cursor) else {
            return;
        };
        unit.tags.current = true;
        match state {
            WordState::Still => {}
            WordState::Correct => {
                unit.tags.correct = true;
                unit.tags.wrong = false;
            }
            WordState::Wrong => {
                unit.tags.wrong = true;
                unit.tags.correct = false;
            }
        }
    }

    pub fn units(&self) -> &[WordUnit] {
        &self.units
    }

    pub fn current_unit(&self) -> Option<&WordUnit> {
        self.units.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn window_start(&self) -> usize {
        self.window_start
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn absolute_index(&self) -> usize {
        self.window_start + self.cursor
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
