//! # satchel-core
//!
//! Core types, traits, and abstractions for the Satchel sync backend.
//!
//! This crate provides the domain models, repository trait definitions,
//! and error types that the database and API crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use uuid_utils::new_v7;
