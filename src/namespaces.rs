//! SAML 2.0 namespace URIs and protocol constants.

/// `urn:oasis:names:tc:SAML:2.0:protocol`
pub const NS_SAML2_PROTOCOL: &str = "urn:oasis:names:tc:SAML:2.0:protocol";
/// `urn:oasis:names:tc:SAML:2.0:assertion`
pub const NS_SAML2_ASSERTION: &str = "urn:oasis:names:tc:SAML:2.0:assertion";

/// Namespace prefix used for the protocol namespace in path lookups.
pub const PREFIX_SAMLP: &str = "samlp";
/// Namespace prefix used for the assertion namespace in path lookups.
pub const PREFIX_SAML: &str = "saml";

pub const BINDING_HTTP_POST: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST";
pub const BINDING_HTTP_REDIRECT: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect";

pub const NAMEID_FORMAT_UNSPECIFIED: &str =
    "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified";

/// SAML `dateTime`, integer-second form: `2020-01-16T14:32:32Z`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
/// SAML `dateTime`, fractional-second form: `2020-01-16T14:32:32.128000Z`.
pub const DATE_TIME_FORMAT_FRACTIONAL: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
