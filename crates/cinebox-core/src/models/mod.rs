//! Data models for the application
//!
//! Wire types exchanged with the movies API plus the transient upload draft
//! state. The API speaks camelCase JSON; everything here carries the serde
//! renames to match.

mod movie;
mod upload;

pub use movie::*;
pub use upload::*;
