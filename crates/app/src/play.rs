use std::io::{self, Write};

use services::QuizSession;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::intent::Intent;
use crate::render;

/// Drive `session` from line-based input until EOF or `:quit`.
///
/// Each line is one intent and runs to completion, including its storage
/// write, before the next line is read.
///
/// # Errors
///
/// Returns `io::Error` if reading input or writing output fails.
pub async fn run<R, W>(session: &mut QuizSession, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "{}", render::problem(&session.snapshot()))?;
    prompt(out)?;

    while let Some(line) = lines.next_line().await? {
        match Intent::parse(&line) {
            Intent::Quit => break,
            Intent::Answer(raw) => {
                session.set_pending_input(raw);
                if let Some(grading) = session.submit_pending().await {
                    writeln!(out, "{}", render::grading(&grading))?;
                }
            }
            Intent::Digits(raw) => match raw.parse::<i64>() {
                Ok(width) => {
                    if let Err(err) = session.set_digit_width(width).await {
                        writeln!(out, "{err}")?;
                    }
                }
                Err(_) => writeln!(out, "digit width must be a whole number, got {raw:?}")?,
            },
            Intent::Operator(symbol) => {
                if !session.set_operator_symbol(&symbol).await {
                    writeln!(
                        out,
                        "unknown operator {symbol:?}, expected one of {}",
                        render::operators()
                    )?;
                }
            }
            Intent::Reset => {
                session.reset().await;
                writeln!(out, "Score and history cleared.")?;
            }
            Intent::History => writeln!(out, "{}", render::history(session.history()))?,
            Intent::Help => writeln!(out, "{}", render::HELP)?,
            Intent::Unknown(command) => {
                writeln!(out, "unknown command {command:?}, type :help")?;
            }
        }

        if let Some(err) = session.take_persistence_error() {
            writeln!(out, "warning: progress was not saved ({err})")?;
        }
        writeln!(out, "{}", render::problem(&session.snapshot()))?;
        prompt(out)?;
    }

    writeln!(out)?;
    out.flush()
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::SequenceGenerator;
    use storage::Storage;

    async fn session(values: &[u64]) -> QuizSession {
        QuizSession::initialize(
            Storage::in_memory().quiz_store(),
            Box::new(SequenceGenerator::new(values.to_vec())),
        )
        .await
        .unwrap()
    }

    async fn play(session: &mut QuizSession, script: &str) -> String {
        let mut out = Vec::new();
        run(session, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn answers_are_graded_and_rerendered() {
        let mut session = session(&[3, 4, 5, 6]).await;
        let output = play(&mut session, "7\n\n").await;

        assert!(output.contains("3 + 4 = 7  Correct"));
        assert!(output.contains("Score: 1  [digits 1, op +]\n5 + 6 = ?"));
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn settings_commands_reach_the_session() {
        let mut session = session(&[3, 4, 12, 34]).await;
        let output = play(&mut session, ":digits 0\n:digits two\n:op ^\n:op *\n:digits 2\n:quit\n7\n").await;

        assert!(output.contains("invalid configuration"));
        assert!(output.contains("digit width must be a whole number"));
        assert!(output.contains("unknown operator \"^\""));
        assert!(output.contains("12 * 34 = ?"));
        assert_eq!(session.config().digit_width.get(), 2);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn reset_and_history_commands() {
        let mut session = session(&[1, 1]).await;
        let output = play(&mut session, "5\n:history\n:reset\n:history\n").await;

        assert!(output.contains("1 + 1 = 5  Wrong"));
        assert!(output.contains("Score and history cleared."));
        assert!(output.contains("No history yet."));
        assert_eq!(session.score(), 0);
    }
}
