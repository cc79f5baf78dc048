//! Coarse error classification shared by every layer that reports errors over HTTP

use blog_core::DomainError;

/// How a failure should be reported to a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorKind {
    /// HTTP status code for this kind
    #[must_use]
    pub fn status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }

    /// Whether the cause must stay out of the response body
    #[must_use]
    pub fn is_internal(self) -> bool {
        self == Self::Internal
    }
}

impl From<&DomainError> for ErrorKind {
    fn from(err: &DomainError) -> Self {
        if err.is_not_found() {
            Self::NotFound
        } else if err.is_authentication() {
            Self::Unauthorized
        } else if err.is_validation() {
            Self::BadRequest
        } else if err.is_conflict() {
            Self::Conflict
        } else {
            Self::Internal
        }
    }
}
