#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;

pub use error::SessionError;
pub use quiz::{Grading, QuizSession, SessionSnapshot};
