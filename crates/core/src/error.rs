use thiserror::Error;

use crate::model::MAX_DIGIT_WIDTH;

/// Errors raised by the quiz domain.
///
/// Only configuration is validated strictly; malformed answers degrade to an
/// incorrect grading instead of producing an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error(
        "invalid configuration: digit width must be between 1 and {max}, got {digit_width}",
        max = MAX_DIGIT_WIDTH
    )]
    InvalidConfiguration { digit_width: i64 },
    #[error("unknown operator: {0:?}")]
    UnknownOperator(String),
}
