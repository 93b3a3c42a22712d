//! RPSSL Shared - wire types for the public HTTP API.
//!
//! # Design Principles
//!
//! 1. **No business logic** - pure data types, serialization and input validation
//! 2. **Domain vocabulary** - responses reuse `Choice`/`Outcome` from the domain crate

pub mod requests;
pub mod responses;

pub use requests::{PlayRequest, ResetQuery};
pub use responses::{ChoiceResponse, ErrorResponse, PlayResponse, ResultResponse};
