use chrono::{DateTime, Utc};

/// Error taxonomy for request building and response validation.
///
/// Every variant is fail-closed: nothing here is retried internally and
/// nothing here is logged with its payload (see crate-level docs).
#[derive(Debug, thiserror::Error)]
pub enum SamlError {
    #[error("malformed SAML response: {0}")]
    MalformedSamlResponse(String),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("issuer mismatch: received {received:?}, expected {expected:?}")]
    IssuerMismatch { received: String, expected: String },

    #[error("audience mismatch: received {received:?}, expected {expected:?}")]
    AudienceMismatch { received: String, expected: String },

    #[error("response too early: observed {observed}, not valid before {not_before}")]
    ResponseTooEarly {
        observed: DateTime<Utc>,
        not_before: DateTime<Utc>,
    },

    #[error("response expired: observed {observed}, not valid on or after {not_on_or_after}")]
    ResponseExpired {
        observed: DateTime<Utc>,
        not_on_or_after: DateTime<Utc>,
    },

    #[error("unsupported signature algorithm")]
    UnsupportedAlgorithm,

    #[error("signature verification failed")]
    SignatureMismatch,
}

pub type SamlResult<T> = Result<T, SamlError>;
