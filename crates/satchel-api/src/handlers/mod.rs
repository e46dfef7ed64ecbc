//! HTTP handler modules for satchel-api.
//!
//! One module per resource; every handler performs a single repository
//! round trip (plus at most one uid resolution) and returns either the
//! row(s) or an [`crate::ApiError`] envelope.

pub mod history;
pub mod settings;
pub mod shortcuts;
pub mod system;
pub mod users;
