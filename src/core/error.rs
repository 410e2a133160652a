//! The structural-error type returned at simplification/serialization
//! boundaries.

use std::fmt;

/// A structural error surfaced by the simplifier or a serializer.
///
/// Every core pass that walks an [`Expression`](super::Expression) returns
/// `Result<_, ErrorMsg>` rather than panicking, even though the enum's own
/// constructors make a missing operand unrepresentable: the point is that
/// the *contract* at the boundary is a sum type, so a future variant that
/// can fail (a malformed matrix, say) has somewhere to report through
/// without changing every call site's signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMsg(String);

impl ErrorMsg {
    /// Build an error message from anything that converts to a `String`.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Borrow the underlying message.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ErrorMsg {}

impl From<String> for ErrorMsg {
    fn from(msg: String) -> Self {
        Self(msg)
    }
}

impl From<&str> for ErrorMsg {
    fn from(msg: &str) -> Self {
        Self(msg.to_owned())
    }
}
