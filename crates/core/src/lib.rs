#![forbid(unsafe_code)]

pub mod error;
pub mod evaluator;
pub mod generator;
pub mod model;

pub use error::QuizError;
pub use evaluator::evaluate;
pub use generator::{OperandGenerator, RandomProblemGenerator, SequenceGenerator, generate_operand};
