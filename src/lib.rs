//! Minimal SAML 2.0 Service Provider support.
//!
//! This crate builds `AuthnRequest` redirect URLs and validates signed
//! `Response`/`Assertion` documents for the Web-Browser-SSO profile with
//! HTTP-Redirect requests and HTTP-POST responses. It does not implement
//! XML-DSig itself: callers supply a [`verifier::SignatureVerifier`] backed
//! by whatever XML security library they trust. It performs no network
//! I/O, no certificate parsing, and caches nothing — replay defence and
//! session storage are the caller's concern.

mod clock;
mod dispatch;
mod error;
mod model;
mod namespaces;
mod request;
mod response;
mod time;
mod verifier;
mod xml;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dispatch::{validate_multi_tenant_async, validate_multi_tenant_sync, DispatchError};
pub use error::{SamlError, SamlResult};
pub use model::{Attribute, Response, TimeDriftLimits, ValidationConfig};
pub use request::build_redirect_url;
pub use response::{validate, validate_with_verify_config};
pub use verifier::{SignatureVerifier, VerifyConfig};

#[cfg(test)]
mod tests;
