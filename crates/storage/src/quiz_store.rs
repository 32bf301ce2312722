use std::fmt;
use std::sync::Arc;

use drill_core::model::{AttemptRecord, DigitWidth, Operator, QuizConfig};
use tracing::warn;

use crate::keys;
use crate::repository::{KeyValueStore, StorageError};

/// Values read back from storage.
///
/// A field is `None` when its key is absent or its value cannot be decoded.
/// The digit width is kept raw so callers decide how to treat out-of-range
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedQuiz {
    pub digit_width: Option<i64>,
    pub operator: Option<Operator>,
    pub score: Option<i64>,
    pub history: Option<Vec<AttemptRecord>>,
}

/// Typed codec for the quiz keys on top of a `KeyValueStore`.
#[derive(Clone)]
pub struct QuizStore {
    kv: Arc<dyn KeyValueStore>,
}

impl QuizStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Read every quiz key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only if the backend itself fails; undecodable
    /// values are logged and reported as absent.
    pub async fn load(&self) -> Result<PersistedQuiz, StorageError> {
        let digit_width = self
            .kv
            .load(keys::DIGIT)
            .await?
            .and_then(|raw| decode_integer(keys::DIGIT, &raw));

        let operator = self
            .kv
            .load(keys::OPERATION)
            .await?
            .and_then(|raw| decode_operator(&raw));

        let score = self
            .kv
            .load(keys::SCORE)
            .await?
            .and_then(|raw| decode_integer(keys::SCORE, &raw));

        let history = self
            .kv
            .load(keys::HISTORY)
            .await?
            .and_then(|raw| decode_history(&raw));

        Ok(PersistedQuiz {
            digit_width,
            operator,
            score,
            history,
        })
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn save_digit_width(&self, width: DigitWidth) -> Result<(), StorageError> {
        self.kv.save(keys::DIGIT, &width.to_string()).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn save_operator(&self, operator: Operator) -> Result<(), StorageError> {
        self.kv.save(keys::OPERATION, operator.symbol()).await
    }

    /// Write both configuration keys in one batch.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn save_config(&self, config: QuizConfig) -> Result<(), StorageError> {
        self.kv
            .save_all(&[
                (keys::DIGIT, config.digit_width.to_string()),
                (keys::OPERATION, config.operator.symbol().to_owned()),
            ])
            .await
    }

    /// Write score then history in one batch.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be encoded or the write
    /// fails.
    pub async fn save_progress(
        &self,
        score: i64,
        history: &[AttemptRecord],
    ) -> Result<(), StorageError> {
        let history = encode_history(history)?;
        self.kv
            .save_all(&[(keys::SCORE, score.to_string()), (keys::HISTORY, history)])
            .await
    }

    /// Remove the persisted score and history.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete fails.
    pub async fn clear_progress(&self) -> Result<(), StorageError> {
        self.kv.remove_all(&[keys::SCORE, keys::HISTORY]).await
    }
}

impl fmt::Debug for QuizStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizStore").finish_non_exhaustive()
    }
}

//
// ─── CODEC ────────────────────────────────────────────────────────────────────
//

fn decode_integer(key: &'static str, raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<i64>() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key = key, value = raw, error = %err, "ignoring unreadable persisted integer");
            None
        }
    }
}

fn decode_operator(raw: &str) -> Option<Operator> {
    if raw.trim().is_empty() {
        return None;
    }
    let operator = Operator::from_symbol(raw);
    if operator.is_none() {
        warn!(key = keys::OPERATION, value = raw, "ignoring unknown persisted operator");
    }
    operator
}

fn decode_history(raw: &str) -> Option<Vec<AttemptRecord>> {
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(history) => Some(history),
        Err(err) => {
            warn!(key = keys::HISTORY, error = %err, "ignoring unreadable persisted history");
            None
        }
    }
}

fn encode_history(history: &[AttemptRecord]) -> Result<String, StorageError> {
    serde_json::to_string(history).map_err(|e| StorageError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;

    fn store_with(entries: &[(&str, &str)]) -> (InMemoryStore, QuizStore) {
        let mem = InMemoryStore::with_entries(entries.iter().copied());
        let quiz = QuizStore::new(Arc::new(mem.clone()));
        (mem, quiz)
    }

    #[tokio::test]
    async fn empty_store_loads_nothing() {
        let (_, quiz) = store_with(&[]);
        assert_eq!(quiz.load().await.unwrap(), PersistedQuiz::default());
    }

    #[tokio::test]
    async fn decodes_all_keys() {
        let (_, quiz) = store_with(&[
            ("digit", "2"),
            ("operation", "*"),
            ("score", "-5"),
            ("history", r#"[{"q":"3 * 4","a":"12","correct":true}]"#),
        ]);
        let loaded = quiz.load().await.unwrap();
        assert_eq!(loaded.digit_width, Some(2));
        assert_eq!(loaded.operator, Some(Operator::Multiply));
        assert_eq!(loaded.score, Some(-5));
        assert_eq!(
            loaded.history,
            Some(vec![AttemptRecord::new("3 * 4", "12", true)])
        );
    }

    #[tokio::test]
    async fn unreadable_values_read_as_absent() {
        let (_, quiz) = store_with(&[
            ("digit", "two"),
            ("operation", "^"),
            ("score", ""),
            ("history", "{not json"),
        ]);
        assert_eq!(quiz.load().await.unwrap(), PersistedQuiz::default());
    }

    #[tokio::test]
    async fn out_of_range_digit_width_is_returned_raw() {
        let (_, quiz) = store_with(&[("digit", "0")]);
        assert_eq!(quiz.load().await.unwrap().digit_width, Some(0));
    }

    #[tokio::test]
    async fn writes_use_string_encodings() {
        let (mem, quiz) = store_with(&[]);
        quiz.save_config(QuizConfig::new(
            DigitWidth::new(3).unwrap(),
            Operator::Divide,
        ))
        .await
        .unwrap();
        quiz.save_progress(-2, &[AttemptRecord::new("9 / 3", "4", false)])
            .await
            .unwrap();

        let entries = mem.snapshot().unwrap();
        assert_eq!(entries["digit"], "3");
        assert_eq!(entries["operation"], "/");
        assert_eq!(entries["score"], "-2");
        assert_eq!(
            entries["history"],
            r#"[{"q":"9 / 3","a":"4","correct":false}]"#
        );

        quiz.clear_progress().await.unwrap();
        let entries = mem.snapshot().unwrap();
        assert!(!entries.contains_key("score"));
        assert!(!entries.contains_key("history"));
        assert_eq!(entries["digit"], "3");
    }
}
