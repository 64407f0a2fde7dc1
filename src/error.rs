//! Error types for the twoq library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (zero capacity, out-of-range ratios).
//!
//! Errors are reported only at construction time. Every other operation in
//! the crate is total: absence is reported through `Option` or a boolean
//! presence flag, never through an error.
//!
//! ## Example Usage
//!
//! ```
//! use twoq::error::ConfigError;
//! use twoq::policy::two_q::TwoQCore;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<TwoQCore<String, i32>, ConfigError> =
//!     TwoQCore::try_with_params(100, 0.25, 0.5);
//! assert!(cache.is_ok());
//!
//! // Invalid ratio is caught without panicking
//! let bad = TwoQCore::<String, i32>::try_with_params(100, 2.0, 0.5);
//! assert_eq!(bad.unwrap_err(), ConfigError::InvalidRecentRatio);
//! ```

use std::fmt;

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by the fallible constructors (`try_new`, `try_with_evict`,
/// `try_with_params`). Each variant names the parameter that failed
/// validation.
///
/// # Example
///
/// ```
/// use twoq::error::ConfigError;
/// use twoq::policy::lru::LruCore;
///
/// let err = LruCore::<u64, u64>::try_new(0).unwrap_err();
/// assert_eq!(err, ConfigError::InvalidSize);
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity must be greater than zero.
    InvalidSize,
    /// The recent ratio must lie within `[0, 1]`.
    InvalidRecentRatio,
    /// The ghost ratio must lie within `[0, 1]`.
    InvalidGhostRatio,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSize => f.write_str("capacity must be greater than zero"),
            ConfigError::InvalidRecentRatio => f.write_str("recent ratio must be in [0, 1]"),
            ConfigError::InvalidGhostRatio => f.write_str("ghost ratio must be in [0, 1]"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_offending_parameter() {
        assert_eq!(
            ConfigError::InvalidSize.to_string(),
            "capacity must be greater than zero"
        );
        assert!(ConfigError::InvalidRecentRatio
            .to_string()
            .contains("recent ratio"));
        assert!(ConfigError::InvalidGhostRatio
            .to_string()
            .contains("ghost ratio"));
    }

    #[test]
    fn debug_includes_variant_name() {
        let dbg = format!("{:?}", ConfigError::InvalidGhostRatio);
        assert!(dbg.contains("InvalidGhostRatio"));
    }

    #[test]
    fn clone_and_eq() {
        let a = ConfigError::InvalidSize;
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, ConfigError::InvalidRecentRatio);
    }

    #[test]
    fn implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }
}
