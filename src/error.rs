// ABOUTME: Error types for BSON validation.
// ABOUTME: Each variant is one local violation; ValidationError adds the positional context.

use std::fmt;

/// The result type for BSON validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Broad classification of a failure, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The bytes are not a well-formed BSON document.
    InvalidBson,
    /// The document nests deeper than the configured maximum.
    Overflow,
    /// A configuration value was rejected.
    BadValue,
}

impl ErrorCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidBson => "InvalidBSON",
            ErrorCode::Overflow => "Overflow",
            ErrorCode::BadValue => "BadValue",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation violation, detected at the point where it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The engine has more frame slots than the depth limit allows.
    CannotEnforceMaxDepth,

    /// The buffer or the declared document length is below 5 bytes.
    DocumentTooShort,

    /// The declared document length exceeds the buffer.
    IncorrectDocumentLength,

    /// The byte before the declared document end is not zero.
    NotTerminatedWithEoo,

    /// A read or skip would cross the end of the enclosing object.
    SizeLargerThanBuffer,

    /// A nested object, array or CodeWScope declares fewer than 5 bytes.
    NestedObjectTooShort,

    /// An object's EOO byte is not where its declared length puts it.
    IncorrectLength,

    /// A length-prefixed string is empty or lacks its NUL terminator.
    UnterminatedString,

    /// A bool payload byte other than 0 or 1.
    InvalidBool(u8),

    /// A type tag with no BSON meaning.
    UnrecognizedType(u8),

    /// Nesting exceeds the maximum allowable depth.
    MaxDepthExceeded,

    /// A maximum depth setting outside the supported range.
    DepthOutOfRange(usize),
}

impl Error {
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::MaxDepthExceeded => ErrorCode::Overflow,
            Error::DepthOutOfRange(_) => ErrorCode::BadValue,
            _ => ErrorCode::InvalidBson,
        }
    }

    /// Returns the standardized error type name for test matching.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Error::CannotEnforceMaxDepth => "cannot_enforce_max_depth",
            Error::DocumentTooShort => "document_too_short",
            Error::IncorrectDocumentLength => "incorrect_document_length",
            Error::NotTerminatedWithEoo => "not_terminated_with_eoo",
            Error::SizeLargerThanBuffer => "size_larger_than_buffer",
            Error::NestedObjectTooShort => "nested_object_too_short",
            Error::IncorrectLength => "incorrect_length",
            Error::UnterminatedString => "unterminated_string",
            Error::InvalidBool(_) => "invalid_bool",
            Error::UnrecognizedType(_) => "unrecognized_type",
            Error::MaxDepthExceeded => "max_depth_exceeded",
            Error::DepthOutOfRange(_) => "depth_out_of_range",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CannotEnforceMaxDepth => write!(f, "Cannot enforce max nesting depth"),
            Error::DocumentTooShort => write!(f, "BSON data has to be at least 5 bytes"),
            Error::IncorrectDocumentLength => write!(f, "Incorrect BSON length"),
            Error::NotTerminatedWithEoo => write!(f, "BSON object not terminated with EOO"),
            Error::SizeLargerThanBuffer => write!(f, "BSON size is larger than buffer size"),
            Error::NestedObjectTooShort => {
                write!(f, "Nested BSON object has to be at least 5 bytes")
            }
            Error::IncorrectLength => write!(f, "incorrect BSON length"),
            Error::UnterminatedString => write!(f, "Not null terminated string"),
            Error::InvalidBool(value) => {
                write!(f, "BSON bool is neither false nor true (0x{value:02x})")
            }
            Error::UnrecognizedType(code) => write!(f, "Unrecognized BSON type {code}"),
            Error::MaxDepthExceeded => write!(f, "BSONObj exceeds maximum nested object depth"),
            Error::DepthOutOfRange(depth) => write!(
                f,
                "maximum BSON depth {depth} is outside the range [{}, {}]",
                crate::limits::MAX_DEPTH_FLOOR,
                crate::limits::MAX_DEPTH_CEILING
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A validation failure as returned by the public entry points.
///
/// The precise engine attaches a context naming the offending field path and
/// the `_id` of the enclosing document; the fast engine reports the bare error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    error: Error,
    context: Option<String>,
}

impl ValidationError {
    #[must_use]
    pub fn new(error: Error, context: Option<String>) -> Self {
        Self { error, context }
    }

    #[must_use]
    pub fn error(&self) -> Error {
        self.error
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.error.code()
    }

    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{} {}", self.error, context),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<Error> for ValidationError {
    fn from(error: Error) -> Self {
        Self::new(error, None)
    }
}
