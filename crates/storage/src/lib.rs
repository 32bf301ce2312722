#![forbid(unsafe_code)]

pub mod keys;
pub mod quiz_store;
pub mod repository;
pub mod sqlite;

pub use quiz_store::{PersistedQuiz, QuizStore};
pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
