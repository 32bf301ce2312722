use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Largest supported digit width.
///
/// `10^18 - 1` still fits in a `u64` operand and every operator result fits in
/// an `i128`.
pub const MAX_DIGIT_WIDTH: u32 = 18;

//
// ─── DIGIT WIDTH ──────────────────────────────────────────────────────────────
//

/// Number of decimal digits each generated operand may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct DigitWidth(u32);

impl DigitWidth {
    /// Validate a raw digit width.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidConfiguration` if `value` is below 1 or above
    /// `MAX_DIGIT_WIDTH`.
    pub fn new(value: i64) -> Result<Self, QuizError> {
        match u32::try_from(value) {
            Ok(width) if (1..=MAX_DIGIT_WIDTH).contains(&width) => Ok(Self(width)),
            _ => Err(QuizError::InvalidConfiguration { digit_width: value }),
        }
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Largest operand for this width (`10^width - 1`).
    #[must_use]
    pub fn max_operand(self) -> u64 {
        10_u64.pow(self.0) - 1
    }
}

impl Default for DigitWidth {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<i64> for DigitWidth {
    type Error = QuizError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DigitWidth> for i64 {
    fn from(width: DigitWidth) -> Self {
        i64::from(width.0)
    }
}

impl fmt::Display for DigitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── OPERATOR ─────────────────────────────────────────────────────────────────
//

/// The five supported arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Operator {
    #[default]
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Remainder,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Remainder,
    ];

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Remainder => "%",
        }
    }

    /// Look up an operator by its symbol, ignoring surrounding whitespace.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim();
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl FromStr for Operator {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| QuizError::UnknownOperator(s.to_owned()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

//
// ─── QUIZ CONFIG ──────────────────────────────────────────────────────────────
//

/// User-selected drill settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuizConfig {
    pub digit_width: DigitWidth,
    pub operator: Operator,
}

impl QuizConfig {
    #[must_use]
    pub fn new(digit_width: DigitWidth, operator: Operator) -> Self {
        Self {
            digit_width,
            operator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_width_rejects_out_of_range() {
        for raw in [i64::MIN, -1, 0, 19, 1_000] {
            let err = DigitWidth::new(raw).unwrap_err();
            assert_eq!(err, QuizError::InvalidConfiguration { digit_width: raw });
        }
    }

    #[test]
    fn digit_width_bounds_operands() {
        assert_eq!(DigitWidth::new(1).unwrap().max_operand(), 9);
        assert_eq!(DigitWidth::new(2).unwrap().max_operand(), 99);
        assert_eq!(
            DigitWidth::new(18).unwrap().max_operand(),
            999_999_999_999_999_999
        );
    }

    #[test]
    fn operator_symbols_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
            assert_eq!(op.to_string().parse::<Operator>().unwrap(), op);
        }
        assert_eq!(Operator::from_symbol(" * "), Some(Operator::Multiply));
        assert_eq!(Operator::from_symbol("x"), None);
        assert!(matches!(
            "^".parse::<Operator>(),
            Err(QuizError::UnknownOperator(_))
        ));
    }

    #[test]
    fn defaults_match_a_fresh_install() {
        let config = QuizConfig::default();
        assert_eq!(config.digit_width.get(), 1);
        assert_eq!(config.operator, Operator::Add);
    }

    #[test]
    fn serde_uses_symbols_and_validates_width() {
        let json = serde_json::to_string(&QuizConfig::new(
            DigitWidth::new(3).unwrap(),
            Operator::Remainder,
        ))
        .unwrap();
        assert_eq!(json, r#"{"digit_width":3,"operator":"%"}"#);

        let bad = serde_json::from_str::<QuizConfig>(r#"{"digit_width":0,"operator":"+"}"#);
        assert!(bad.is_err());
    }
}
