use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::QuizError;
use crate::model::{DigitWidth, Problem};

/// Source of operands for new problems.
pub trait OperandGenerator: Send {
    /// Draw one operand in `[0, width.max_operand()]`.
    fn generate(&mut self, width: DigitWidth) -> u64;

    /// Draw a fresh problem; both operands are drawn independently.
    fn next_problem(&mut self, width: DigitWidth) -> Problem {
        let operand_a = self.generate(width);
        let operand_b = self.generate(width);
        Problem::new(operand_a, operand_b)
    }
}

//
// ─── RANDOM ───────────────────────────────────────────────────────────────────
//

/// Uniform operand generator.
///
/// `Thread` draws from the thread-local process RNG; `Seeded` owns a
/// deterministic `StdRng` for reproducible runs.
#[derive(Debug, Clone, Default)]
pub enum RandomProblemGenerator {
    #[default]
    Thread,
    Seeded(StdRng),
}

impl RandomProblemGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::Thread
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(StdRng::seed_from_u64(seed))
    }
}

impl OperandGenerator for RandomProblemGenerator {
    fn generate(&mut self, width: DigitWidth) -> u64 {
        let max = width.max_operand();
        match self {
            Self::Thread => rand::rng().random_range(0..=max),
            Self::Seeded(rng) => rng.random_range(0..=max),
        }
    }
}

/// Draw a single operand for a raw digit width using the process RNG.
///
/// # Errors
///
/// Returns `QuizError::InvalidConfiguration` if `digit_width` is not a valid
/// `DigitWidth`.
pub fn generate_operand(digit_width: i64) -> Result<u64, QuizError> {
    let width = DigitWidth::new(digit_width)?;
    Ok(RandomProblemGenerator::Thread.generate(width))
}

//
// ─── SEQUENCE ─────────────────────────────────────────────────────────────────
//

/// Replays a fixed list of operands in a cycle.
///
/// Values above the width's maximum are clamped. An empty list always yields 0.
#[derive(Debug, Clone, Default)]
pub struct SequenceGenerator {
    values: Vec<u64>,
    cursor: usize,
}

impl SequenceGenerator {
    #[must_use]
    pub fn new(values: impl Into<Vec<u64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl OperandGenerator for SequenceGenerator {
    fn generate(&mut self, width: DigitWidth) -> u64 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value.min(width.max_operand())
    }
}
