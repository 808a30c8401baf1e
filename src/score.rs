//! Running score for the current game
//!
//! Kept outside `World` so the UI can read it without touching sim state.
//! Every increment forwards the new total to a high-score sink, once per call.

/// Receives the running total after every increment
pub trait HighScoreSink {
    fn report_total(&mut self, total: i64);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    total: i64,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// Apply a signed delta and report the new total
    pub fn increment(&mut self, delta: i64, sink: &mut dyn HighScoreSink) -> i64 {
        self.total = self.total.saturating_add(delta);
        sink.report_total(self.total);
        self.total
    }

    pub fn reset(&mut self) {
        self.total = 0;
    }
}
