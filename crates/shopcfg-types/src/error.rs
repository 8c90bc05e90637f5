//! Error code interface shared by all shopcfg crates.
//!
//! Every error enum in the workspace implements [`ErrorCode`] so callers can
//! branch on a stable string instead of matching on variants across crate
//! boundaries.
//!
//! # Example
//!
//! ```
//! use shopcfg_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LookupError {
//!     Missing,
//!     Corrupt,
//! }
//!
//! impl ErrorCode for LookupError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Missing => "LOOKUP_MISSING",
//!             Self::Corrupt => "LOOKUP_CORRUPT",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Missing)
//!     }
//! }
//!
//! assert_eq!(LookupError::Missing.code(), "LOOKUP_MISSING");
//! assert!(!LookupError::Corrupt.is_recoverable());
//! ```

/// Machine-readable classification of an error.
///
/// # Code Format
///
/// - UPPER_SNAKE_CASE
/// - Prefixed with the owning layer (`CONFIG_`, `STORAGE_`)
/// - Stable once published
///
/// # Recoverability
///
/// An error is recoverable when the caller can act on it: writing the
/// missing document, or retrying a transient I/O failure. A document that
/// exists but is malformed is not recoverable until someone edits it.
pub trait ErrorCode {
    /// Returns the stable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the caller can take corrective action.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code is non-empty, carries `expected_prefix`
/// and is UPPER_SNAKE_CASE.
///
/// Intended for tests that walk every variant of an error enum.
///
/// # Panics
///
/// Panics with a descriptive message when a check fails.
///
/// ```
/// use shopcfg_types::{assert_error_code, ErrorCode};
///
/// struct Broken;
///
/// impl ErrorCode for Broken {
///     fn code(&self) -> &'static str { "STORAGE_BROKEN" }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_code(&Broken, "STORAGE_");
/// ```
pub fn assert_error_code<E: ErrorCode + ?Sized>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Runs [`assert_error_code`] over a list of errors.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('_')
        && !s.ends_with('_')
        && !s.contains("__")
        && s
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
