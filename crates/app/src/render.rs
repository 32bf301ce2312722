use std::fmt::Write as _;

use drill_core::model::{AttemptRecord, Operator};
use services::{Grading, SessionSnapshot};

pub const HELP: &str = "\
Type an answer and press Enter.
Commands:
  :digits N   operand digit width (N >= 1)
  :op S       operator, one of + - * / %
  :history    show past attempts
  :reset      clear score and history
  :help       show this help
  :quit       exit";

/// Score line and the current problem.
#[must_use]
pub fn problem(snapshot: &SessionSnapshot) -> String {
    format!(
        "Score: {}  [digits {}, op {}]\n{} = ?",
        snapshot.score,
        snapshot.digit_width,
        snapshot.operator,
        snapshot.expression()
    )
}

#[must_use]
pub fn grading(outcome: &Grading) -> String {
    format!(
        "{} = {}  {}",
        outcome.record.q,
        outcome.record.a,
        verdict(outcome.record.correct)
    )
}

/// One line per attempt, oldest first.
#[must_use]
pub fn history(history: &[AttemptRecord]) -> String {
    if history.is_empty() {
        return "No history yet.".to_owned();
    }

    let mut out = String::new();
    for (index, item) in history.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{} = {}  {}", item.q, item.a, verdict(item.correct));
    }
    out
}

#[must_use]
pub fn operators() -> String {
    Operator::ALL
        .iter()
        .map(|op| op.symbol())
        .collect::<Vec<_>>()
        .join(" ")
}

fn verdict(correct: bool) -> &'static str {
    if correct { "Correct" } else { "Wrong" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::DigitWidth;

    fn snapshot(history: Vec<AttemptRecord>) -> SessionSnapshot {
        SessionSnapshot {
            operand_a: 3,
            operand_b: 4,
            operator: Operator::Add,
            digit_width: DigitWidth::default(),
            score: -2,
            history,
            pending_input: String::new(),
        }
    }

    #[test]
    fn problem_shows_score_and_expression() {
        assert_eq!(
            problem(&snapshot(Vec::new())),
            "Score: -2  [digits 1, op +]\n3 + 4 = ?"
        );
    }

    #[test]
    fn empty_history_has_a_placeholder() {
        assert_eq!(history(&[]), "No history yet.");
    }

    #[test]
    fn history_lists_attempts_in_order() {
        let rendered = history(&[
            AttemptRecord::new("3 + 4", "7", true),
            AttemptRecord::new("1 + 1", "3", false),
        ]);
        assert_eq!(rendered, "3 + 4 = 7  Correct\n1 + 1 = 3  Wrong");
    }

    #[test]
    fn operator_list() {
        assert_eq!(operators(), "+ - * / %");
    }
}
