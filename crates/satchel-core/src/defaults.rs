//! Centralized default constants for the Satchel backend.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default rate limit: max requests per period.
pub const RATE_LIMIT_REQUESTS: u64 = 100;

/// Default rate limit: period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Maximum accepted request body size in bytes. All bodies on this surface
/// are small JSON documents.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

// =============================================================================
// SETTINGS
// =============================================================================

/// Theme applied when a settings payload omits one.
pub const DEFAULT_THEME: &str = "system";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_defaults() {
        assert_eq!(SERVER_PORT, 3000);
        assert_eq!(RATE_LIMIT_REQUESTS, 100);
        assert_eq!(RATE_LIMIT_PERIOD_SECS, 60);
    }

    #[test]
    fn test_default_theme_is_system() {
        assert_eq!(DEFAULT_THEME, "system");
    }
}
