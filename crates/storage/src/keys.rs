//! Persisted key names. Values are strings at the storage boundary.

/// Digit width as a decimal integer.
pub const DIGIT: &str = "digit";
/// Operator symbol, one of `+ - * / %`.
pub const OPERATION: &str = "operation";
/// Score as a decimal integer, may be negative.
pub const SCORE: &str = "score";
/// JSON array of `{q, a, correct}` records.
pub const HISTORY: &str = "history";
