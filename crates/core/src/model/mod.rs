mod attempt;
mod config;
mod problem;

pub use attempt::{Answer, AttemptRecord};
pub use config::{DigitWidth, MAX_DIGIT_WIDTH, Operator, QuizConfig};
pub use problem::Problem;
