//! RPSSL Engine library.
//!
//! Server-side code for the Rock-Paper-Scissors-Lizard-Spock game backend.
//!
//! ## Structure
//!
//! - `use_cases/` - Game and choice orchestration
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
