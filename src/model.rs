//! Value types returned by and configuring validation.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One `<saml:Attribute>` from an `AttributeStatement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub values: Vec<String>,
    pub format: Option<String>,
    /// Any XML attribute on `<Attribute>` other than `Name`/`NameFormat`.
    pub extra_attributes: HashMap<String, String>,
}

impl Attribute {
    /// The first value, if any. Most attributes in practice carry exactly
    /// one; this is a convenience for that common case.
    pub fn primary_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// A validated SAML response, projected into the fields this profile cares
/// about. Constructed once per successful [`crate::response::validate`] call
/// and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<C> {
    pub issuer: String,
    pub name_id: String,
    pub audience: String,
    pub attributes: Vec<Attribute>,
    pub session_not_on_or_after: Option<DateTime<Utc>>,
    pub in_response_to: Option<String>,
    /// The trust anchor that verified this response's signature.
    pub certificate: C,
}

impl<C> Response<C> {
    /// Looks up an attribute by name, returning its first value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .and_then(Attribute::primary_value)
    }
}

/// Tolerance applied on either side of the assertion's validity window.
/// Defaults to zero drift in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDriftLimits {
    pub not_before_max_drift: Duration,
    pub not_on_or_after_max_drift: Duration,
}

impl Default for TimeDriftLimits {
    fn default() -> Self {
        Self {
            not_before_max_drift: Duration::ZERO,
            not_on_or_after_max_drift: Duration::ZERO,
        }
    }
}

impl TimeDriftLimits {
    pub fn new(not_before_max_drift: Duration, not_on_or_after_max_drift: Duration) -> Self {
        Self {
            not_before_max_drift,
            not_on_or_after_max_drift,
        }
    }

    pub fn with_not_before_drift(mut self, drift: Duration) -> Self {
        self.not_before_max_drift = drift;
        self
    }

    pub fn with_not_on_or_after_drift(mut self, drift: Duration) -> Self {
        self.not_on_or_after_max_drift = drift;
        self
    }
}

/// Configuration for a single validation call: which certificates are
/// trusted and how much clock drift to tolerate. `C` is the caller's
/// certificate representation; this crate never parses certificate bytes
/// itself, it only compares them for identity.
#[derive(Debug, Clone)]
pub struct ValidationConfig<C> {
    pub trust_anchors: Vec<C>,
    pub allowed_time_drift: TimeDriftLimits,
}

impl<C> ValidationConfig<C> {
    pub fn new(trust_anchors: Vec<C>) -> Self {
        Self {
            trust_anchors,
            allowed_time_drift: TimeDriftLimits::default(),
        }
    }

    pub fn with_drift(mut self, drift: TimeDriftLimits) -> Self {
        self.allowed_time_drift = drift;
        self
    }
}
