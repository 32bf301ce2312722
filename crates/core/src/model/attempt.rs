use serde::{Deserialize, Serialize};

//
// ─── ANSWER ───────────────────────────────────────────────────────────────────
//

/// A submitted answer after numeric coercion.
///
/// Anything that is not an integer value becomes `Unmatchable`, which never
/// equals an evaluator result. Grading such an answer is always incorrect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Integer(i128),
    Unmatchable,
}

impl Answer {
    /// Coerce raw user input.
    ///
    /// Returns `None` for empty or whitespace-only input, which callers treat
    /// as "nothing submitted". Integer literals and finite decimals without a
    /// fractional part (`"7.0"`, `"1e3"`) become `Integer`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Ok(value) = trimmed.parse::<i128>() {
            return Some(Self::Integer(value));
        }

        let answer = match trimmed.parse::<f64>() {
            #[allow(clippy::cast_possible_truncation)]
            Ok(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e36 => {
                Self::Integer(value as i128)
            }
            _ => Self::Unmatchable,
        };
        Some(answer)
    }

    #[must_use]
    pub fn value(self) -> Option<i128> {
        match self {
            Self::Integer(value) => Some(value),
            Self::Unmatchable => None,
        }
    }
}

//
// ─── ATTEMPT RECORD ───────────────────────────────────────────────────────────
//

/// One graded submission, as shown in and persisted to the history.
///
/// Field names are the persisted JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Expression as displayed, e.g. `"3 + 4"`.
    pub q: String,
    /// The raw submitted answer.
    pub a: String,
    pub correct: bool,
}

impl AttemptRecord {
    #[must_use]
    pub fn new(expression: impl Into<String>, answer: impl Into<String>, correct: bool) -> Self {
        Self {
            q: expression.into(),
            a: answer.into(),
            correct,
        }
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.q
    }

    #[must_use]
    pub fn submitted_answer(&self) -> &str {
        &self.a
    }

    #[must_use]
    pub fn was_correct(&self) -> bool {
        self.correct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_not_an_answer() {
        assert_eq!(Answer::parse(""), None);
        assert_eq!(Answer::parse("   \t"), None);
    }

    #[test]
    fn integers_and_whole_decimals_coerce() {
        assert_eq!(Answer::parse("7"), Some(Answer::Integer(7)));
        assert_eq!(Answer::parse(" -12 "), Some(Answer::Integer(-12)));
        assert_eq!(Answer::parse("+5"), Some(Answer::Integer(5)));
        assert_eq!(Answer::parse("7.0"), Some(Answer::Integer(7)));
        assert_eq!(Answer::parse("1e3"), Some(Answer::Integer(1000)));
    }

    #[test]
    fn everything_else_is_unmatchable() {
        for raw in ["abc", "3.5", "NaN", "inf", "7 8", "0x10"] {
            assert_eq!(Answer::parse(raw), Some(Answer::Unmatchable), "{raw}");
        }
    }

    #[test]
    fn history_json_uses_short_keys() {
        let record = AttemptRecord::new("3 + 4", "7", true);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"q":"3 + 4","a":"7","correct":true}"#);
    }
}
