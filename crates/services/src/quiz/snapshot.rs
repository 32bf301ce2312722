use serde::Serialize;

use drill_core::model::{AttemptRecord, DigitWidth, Operator};

/// Read-only projection of a session for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub operand_a: u64,
    pub operand_b: u64,
    pub operator: Operator,
    pub digit_width: DigitWidth,
    pub score: i64,
    pub history: Vec<AttemptRecord>,
    pub pending_input: String,
}

impl SessionSnapshot {
    /// The current problem as displayed, e.g. `"3 + 4"`.
    #[must_use]
    pub fn expression(&self) -> String {
        format!("{} {} {}", self.operand_a, self.operator, self.operand_b)
    }
}

/// Outcome of grading one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grading {
    /// The attempt appended to the history.
    pub record: AttemptRecord,
    /// Score after applying this attempt.
    pub score: i64,
}

impl Grading {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.record.correct
    }
}
