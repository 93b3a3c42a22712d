//! SQLite persistence adapters.

mod play_results;

pub use play_results::{SqlitePlayResultRepo, DEFAULT_DATABASE_URL};
