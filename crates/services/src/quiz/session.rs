use std::fmt;

use tracing::{debug, warn};

use drill_core::model::{Answer, AttemptRecord, DigitWidth, Operator, Problem, QuizConfig};
use drill_core::OperandGenerator;
use storage::{PersistedQuiz, QuizStore, StorageError};

use crate::error::SessionError;
use super::snapshot::{Grading, SessionSnapshot};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// The single source of truth for one drill session.
///
/// Every operation finishes its in-memory transition before awaiting the
/// store, so an observer never sees a score without its history entry or a
/// new problem before the previous attempt is recorded. Write failures leave
/// the in-memory state authoritative.
pub struct QuizSession {
    config: QuizConfig,
    problem: Problem,
    pending_input: String,
    score: i64,
    history: Vec<AttemptRecord>,
    store: QuizStore,
    generator: Box<dyn OperandGenerator>,
    persistence_error: Option<StorageError>,
}

impl QuizSession {
    /// Load settings, score and history, then generate the first problem.
    ///
    /// Absent or unreadable values fall back to defaults, and default
    /// settings are written back. If the store cannot be read at all the
    /// session starts from defaults without writing anything.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if the persisted digit width is out of
    /// range.
    pub async fn initialize(
        store: QuizStore,
        mut generator: Box<dyn OperandGenerator>,
    ) -> Result<Self, SessionError> {
        let (persisted, load_error) = match store.load().await {
            Ok(persisted) => (persisted, None),
            Err(err) => {
                warn!(error = %err, "could not load saved quiz, starting from defaults");
                (PersistedQuiz::default(), Some(err))
            }
        };

        let digit_width = persisted
            .digit_width
            .map(DigitWidth::new)
            .transpose()?
            .unwrap_or_default();
        let operator = persisted.operator.unwrap_or_default();
        let config = QuizConfig::new(digit_width, operator);
        let problem = generator.next_problem(digit_width);
        let needs_write_back =
            load_error.is_none() && (persisted.digit_width.is_none() || persisted.operator.is_none());

        let mut session = Self {
            config,
            problem,
            pending_input: String::new(),
            score: persisted.score.unwrap_or(0),
            history: persisted.history.unwrap_or_default(),
            store,
            generator,
            persistence_error: load_error,
        };

        if needs_write_back {
            let result = session.store.save_config(config).await;
            session.record_write(result, "default settings");
        }

        debug!(
            digit_width = %session.config.digit_width,
            operator = %session.config.operator,
            score = session.score,
            attempts = session.history.len(),
            "quiz session initialized"
        );
        Ok(session)
    }

    #[must_use]
    pub fn config(&self) -> QuizConfig {
        self.config
    }

    #[must_use]
    pub fn problem(&self) -> Problem {
        self.problem
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn history(&self) -> &[AttemptRecord] {
        &self.history
    }

    #[must_use]
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Replace the answer currently being typed.
    pub fn set_pending_input(&mut self, raw: impl Into<String>) {
        self.pending_input = raw.into();
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            operand_a: self.problem.operand_a(),
            operand_b: self.problem.operand_b(),
            operator: self.config.operator,
            digit_width: self.config.digit_width,
            score: self.score,
            history: self.history.clone(),
            pending_input: self.pending_input.clone(),
        }
    }

    /// Take the first write failure not yet reported, if any.
    pub fn take_persistence_error(&mut self) -> Option<StorageError> {
        self.persistence_error.take()
    }

    /// Change the digit width and draw a new problem with it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if `digit_width` is out of range; the
    /// session is left untouched.
    pub async fn set_digit_width(&mut self, digit_width: i64) -> Result<(), SessionError> {
        let width = DigitWidth::new(digit_width)?;
        self.config.digit_width = width;
        self.problem = self.generator.next_problem(width);
        debug!(digit_width = %width, "digit width changed");

        let result = self.store.save_digit_width(width).await;
        self.record_write(result, "digit width");
        Ok(())
    }

    /// Change the operator.
    ///
    /// The current operands are kept; the new operator applies to them
    /// immediately and to every problem after.
    pub async fn set_operator(&mut self, operator: Operator) {
        self.config.operator = operator;
        debug!(operator = %operator, "operator changed");

        let result = self.store.save_operator(operator).await;
        self.record_write(result, "operator");
    }

    /// Change the operator from its symbol. Unknown symbols are ignored.
    ///
    /// Returns whether the symbol was recognised.
    pub async fn set_operator_symbol(&mut self, symbol: &str) -> bool {
        match Operator::from_symbol(symbol) {
            Some(operator) => {
                self.set_operator(operator).await;
                true
            }
            None => {
                debug!(symbol = symbol, "ignoring unknown operator symbol");
                false
            }
        }
    }

    /// Grade `raw` against the current problem.
    ///
    /// Empty input is ignored and returns `None`. Otherwise the score moves by
    /// one, the attempt is appended to the history, both are persisted, a new
    /// problem is drawn and the pending input is cleared. Non-numeric answers
    /// and zero divisors grade as incorrect.
    pub async fn submit_answer(&mut self, raw: &str) -> Option<Grading> {
        let answer = Answer::parse(raw)?;
        let operator = self.config.operator;
        let correct = self.problem.grade(operator, &answer);
        let record = AttemptRecord::new(self.problem.expression(operator), raw.trim(), correct);

        self.score = if correct {
            self.score.saturating_add(1)
        } else {
            self.score.saturating_sub(1)
        };
        self.history.push(record.clone());
        self.problem = self.generator.next_problem(self.config.digit_width);
        self.pending_input.clear();
        debug!(
            expression = %record.q,
            answer = %record.a,
            correct = correct,
            score = self.score,
            "answer graded"
        );

        let result = self.store.save_progress(self.score, &self.history).await;
        self.record_write(result, "score and history");

        Some(Grading {
            record,
            score: self.score,
        })
    }

    /// Submit whatever is in the pending input.
    pub async fn submit_pending(&mut self) -> Option<Grading> {
        let raw = self.pending_input.clone();
        self.submit_answer(&raw).await
    }

    /// Zero the score and clear the history.
    ///
    /// Settings and the current problem are kept.
    pub async fn reset(&mut self) {
        self.score = 0;
        self.history.clear();
        debug!("score and history reset");

        let result = self.store.clear_progress().await;
        self.record_write(result, "reset");
    }

    fn record_write(&mut self, result: Result<(), StorageError>, what: &'static str) {
        if let Err(err) = result {
            warn!(error = %err, what = what, "failed to persist quiz state");
            if self.persistence_error.is_none() {
                self.persistence_error = Some(err);
            }
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("config", &self.config)
            .field("problem", &self.problem)
            .field("score", &self.score)
            .field("history_len", &self.history.len())
            .field("pending_input", &self.pending_input)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
