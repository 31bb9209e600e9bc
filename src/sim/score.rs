//! Score counter
//!
//! No bounds are enforced here; the entity that reacted to a collision
//! decides what a negative score means.

/// Single mutable score with a cached display string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    value: i64,
    text: String,
}

impl Score {
    pub fn new(initial: i64) -> Self {
        Self {
            value: initial,
            text: Self::render(initial),
        }
    }

    fn render(value: i64) -> String {
        format!("Score: {}", value)
    }

    pub fn increment(&mut self) {
        self.value += 1;
        self.text = Self::render(self.value);
    }

    pub fn decrement(&mut self) {
        self.value -= 1;
        self.text = Self::render(self.value);
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Display text, always in sync with `value`
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new(0)
    }
}
