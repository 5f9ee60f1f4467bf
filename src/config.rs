// ABOUTME: Validator configuration and the process-wide maximum nesting depth.
// ABOUTME: The depth setting is atomic so concurrent validations never coordinate.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::limits;

static MAX_ALLOWABLE_DEPTH: AtomicUsize = AtomicUsize::new(limits::DEFAULT_MAX_DEPTH);

/// The process-wide maximum nesting depth used by default configurations.
#[must_use]
pub fn max_allowable_depth() -> usize {
    MAX_ALLOWABLE_DEPTH.load(Ordering::Relaxed)
}

/// Change the process-wide maximum nesting depth.
///
/// Values outside `[MAX_DEPTH_FLOOR, MAX_DEPTH_CEILING]` are rejected and the
/// previous setting is kept.
pub fn set_max_allowable_depth(depth: usize) -> Result<(), Error> {
    if !(limits::MAX_DEPTH_FLOOR..=limits::MAX_DEPTH_CEILING).contains(&depth) {
        return Err(Error::DepthOutOfRange(depth));
    }
    MAX_ALLOWABLE_DEPTH.store(depth, Ordering::Relaxed);
    Ok(())
}

/// Configuration options for the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Maximum nesting depth below the top-level document.
    /// A flat document has depth 0.
    pub max_depth: usize,
}

impl ValidatorConfig {
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Frame slots needed to hold a document of the maximum depth.
    #[inline]
    pub(crate) fn max_frames(&self) -> usize {
        self.max_depth.saturating_add(1)
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: max_allowable_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_depth() {
        assert_eq!(set_max_allowable_depth(0), Err(Error::DepthOutOfRange(0)));
        assert_eq!(
            set_max_allowable_depth(limits::MAX_DEPTH_CEILING + 1),
            Err(Error::DepthOutOfRange(limits::MAX_DEPTH_CEILING + 1))
        );
        assert_eq!(max_allowable_depth(), limits::DEFAULT_MAX_DEPTH);
        // Storing the current value keeps other tests unaffected.
        assert!(set_max_allowable_depth(limits::DEFAULT_MAX_DEPTH).is_ok());
    }

    #[test]
    fn test_deserialize_config() {
        let config: ValidatorConfig = serde_json::from_str(r#"{"max_depth": 64}"#).unwrap();
        assert_eq!(config, ValidatorConfig::with_max_depth(64));

        let config: ValidatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_depth, max_allowable_depth());
    }

    #[test]
    fn test_max_frames() {
        assert_eq!(ValidatorConfig::with_max_depth(200).max_frames(), 201);
        assert_eq!(ValidatorConfig::with_max_depth(usize::MAX).max_frames(), usize::MAX);
    }
}
