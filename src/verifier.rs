//! The contract this crate expects from an external XML-DSig engine.
//!
//! This crate does not implement XML canonicalization or signature
//! verification; those are delegated to whatever security library the
//! caller trusts. [`SignatureVerifier`] is the seam: given the raw response
//! bytes and the set of certificates the caller is willing to trust, it
//! returns the verified subtree and the certificate that verified it, or
//! fails.

use roxmltree::Document;

use crate::error::SamlResult;

/// An opaque, caller-supplied configuration for the verification engine
/// (algorithm allow-lists, canonicalization options, and the like). This
/// crate never inspects it.
#[derive(Debug, Clone, Default)]
pub struct VerifyConfig {
    _private: (),
}

impl VerifyConfig {
    pub fn default_config() -> Self {
        Self::default()
    }
}

/// Verifies an enveloped XML-DSig signature over `xml` against one of
/// `trust_anchors`, returning the parsed document and the anchor that
/// verified it.
///
/// Implementations must not return a document whose signature was not
/// actually checked; a verifier that parses but does not verify defeats
/// every guarantee this crate makes. For tests, use a stub that returns a
/// fixed document and the first anchor, mirroring the way the upstream
/// test suite monkeypatches its own extraction function rather than
/// invoking real cryptography.
pub trait SignatureVerifier<C: Clone>: Send + Sync {
    fn extract_verified<'input>(
        &self,
        xml: &'input str,
        trust_anchors: &[C],
        config: &VerifyConfig,
    ) -> SamlResult<(Document<'input>, C)>;
}
