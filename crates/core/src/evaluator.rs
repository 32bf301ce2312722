use crate::model::{Answer, Operator, Problem};

impl Operator {
    /// Compute `a op b`.
    ///
    /// Returns `None` for division or remainder by zero. Division floors;
    /// the remainder takes the sign of the dividend.
    #[must_use]
    pub fn apply(self, a: u64, b: u64) -> Option<i128> {
        let (a, b) = (i128::from(a), i128::from(b));
        match self {
            Operator::Add => Some(a + b),
            Operator::Subtract => Some(a - b),
            Operator::Multiply => Some(a * b),
            // Operands are non-negative, so Euclidean division is floor division.
            Operator::Divide => (b != 0).then(|| a.div_euclid(b)),
            Operator::Remainder => (b != 0).then(|| a % b),
        }
    }
}

/// Grade `answer` against `a op b`.
///
/// Zero divisors and unmatchable answers always grade as incorrect.
#[must_use]
pub fn evaluate(a: u64, b: u64, operator: Operator, answer: &Answer) -> bool {
    match (operator.apply(a, b), answer.value()) {
        (Some(expected), Some(submitted)) => expected == submitted,
        _ => false,
    }
}

impl Problem {
    /// Grade `answer` against this problem under `operator`.
    #[must_use]
    pub fn grade(&self, operator: Operator, answer: &Answer) -> bool {
        evaluate(self.operand_a(), self.operand_b(), operator, answer)
    }
}
