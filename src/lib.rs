// ABOUTME: BSON document validator for Rust.
// ABOUTME: Bounds-checked, non-recursive validation with a fast path and a precise fallback.

//! # bson-validate
//!
//! Validates untrusted bytes as a BSON document before anything else reads
//! them. Validation never panics, never recurses per nesting level, and never
//! reads outside the given slice.
//!
//! ## Quick Start
//!
//! ```rust
//! use bson_validate::validate;
//!
//! // {} : a 5-byte length followed by the EOO byte
//! assert!(validate(&[0x05, 0x00, 0x00, 0x00, 0x00]).is_ok());
//!
//! // The declared length is below the 5-byte minimum
//! let err = validate(&[0x04, 0x00, 0x00, 0x00, 0x00]).unwrap_err();
//! assert_eq!(err.code(), bson_validate::ErrorCode::InvalidBson);
//! ```
//!
//! ## Two engines
//!
//! Every call first runs a fast engine with a fixed 32-frame stack and no
//! diagnostic bookkeeping. Only when it fails (malformed input, nesting deeper
//! than its stack, or a CodeWScope element, which it does not handle) does the
//! precise engine run. The precise engine enforces the configured depth limit
//! and reports where the failure happened:
//!
//! ```text
//! BSON bool is neither false nor true (0x07) in element with field name 'a.flag' in object with _id: 1
//! ```
//!
//! ## Limits
//!
//! - Minimum document size: 5 bytes
//! - Maximum document size: 2 GB (the length prefix is a signed int32)
//! - Maximum nesting depth: 200 by default, configurable in `[21, 1000]`

pub mod config;
mod cursor;
mod element;
pub mod error;
mod frame;
pub mod types;
mod validator;

pub use config::{max_allowable_depth, set_max_allowable_depth, ValidatorConfig};
pub use error::{Error, ErrorCode, Result, ValidationError};
pub use types::{element_type, limits};

/// Validate a BSON document using the process-wide maximum depth.
///
/// `data` is the readable region; the document's declared length may be
/// shorter than it, and bytes past the document are ignored.
///
/// # Example
///
/// ```rust
/// use bson_validate::validate;
///
/// // { "a": 1 }
/// let bytes = [
///     0x0c, 0x00, 0x00, 0x00, // length 12
///     0x10, b'a', 0x00,       // int32 "a"
///     0x01, 0x00, 0x00, 0x00, // 1
///     0x00,                   // EOO
/// ];
/// assert!(validate(&bytes).is_ok());
/// ```
pub fn validate(data: &[u8]) -> Result<()> {
    validate_with_config(data, &ValidatorConfig::default())
}

/// Validate a BSON document with a custom configuration.
pub fn validate_with_config(data: &[u8], config: &ValidatorConfig) -> Result<()> {
    validator::validate_two_tier(data, config)
}

/// Validate with the fast engine only.
///
/// Rejects CodeWScope elements and documents nested deeper than the fast
/// engine's frame capacity even when they are valid. Errors carry no context.
pub fn validate_fast(data: &[u8], config: &ValidatorConfig) -> Result<()> {
    validator::validate_fast(data, config)
}

/// Validate with the precise engine only.
pub fn validate_precise(data: &[u8], config: &ValidatorConfig) -> Result<()> {
    validator::validate_precise(data, config)
}

/// A reusable validator bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator using the process-wide maximum depth.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn validate(&self, data: &[u8]) -> Result<()> {
        validate_with_config(data, &self.config)
    }

    pub fn validate_fast(&self, data: &[u8]) -> Result<()> {
        validate_fast(data, &self.config)
    }

    pub fn validate_precise(&self, data: &[u8]) -> Result<()> {
        validate_precise(data, &self.config)
    }
}
