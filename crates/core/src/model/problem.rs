use serde::{Deserialize, Serialize};

use super::config::Operator;

/// A generated operand pair.
///
/// Problems are replaced wholesale when a new one is generated; they are
/// never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    operand_a: u64,
    operand_b: u64,
}

impl Problem {
    #[must_use]
    pub fn new(operand_a: u64, operand_b: u64) -> Self {
        Self {
            operand_a,
            operand_b,
        }
    }

    #[must_use]
    pub fn operand_a(&self) -> u64 {
        self.operand_a
    }

    #[must_use]
    pub fn operand_b(&self) -> u64 {
        self.operand_b
    }

    /// Display form used in history entries, e.g. `"3 + 4"`.
    #[must_use]
    pub fn expression(&self, operator: Operator) -> String {
        format!("{} {} {}", self.operand_a, operator, self.operand_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expression_uses_single_spaces() {
        let problem = Problem::new(3, 4);
        assert_eq!(problem.expression(Operator::Add), "3 + 4");
        assert_eq!(problem.expression(Operator::Remainder), "3 % 4");
    }
}
