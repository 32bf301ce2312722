mod session;
mod snapshot;

// Public API of the quiz subsystem.
pub use session::QuizSession;
pub use snapshot::{Grading, SessionSnapshot};
