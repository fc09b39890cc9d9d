use roxmltree::Document;

use crate::error::SamlResult;
use crate::verifier::{SignatureVerifier, VerifyConfig};

/// A trust anchor stand-in for tests: this crate only ever compares
/// anchors for identity, never parses them, so a plain string is enough.
pub type TestCert = &'static str;

/// Mirrors the upstream test suite's `null_extract` monkeypatch: parses
/// the given XML and reports it "verified" against the first trust
/// anchor, without performing any real cryptography. Good enough to
/// exercise everything downstream of signature verification.
pub struct NullVerifier;

impl SignatureVerifier<TestCert> for NullVerifier {
    fn extract_verified<'input>(
        &self,
        xml: &'input str,
        trust_anchors: &[TestCert],
        _config: &VerifyConfig,
    ) -> SamlResult<(Document<'input>, TestCert)> {
        let document = Document::parse(xml)
            .map_err(|e| crate::error::SamlError::MalformedSamlResponse(e.to_string()))?;
        Ok((document, trust_anchors[0]))
    }
}

/// A verifier that ignores its input and always reports a fixed document
/// as verified. Used only to simulate a trust-resolution bug (the
/// resolved config's signature check passing against content whose real
/// `Issuer` differs from what dispatch peeked), proving the
/// post-verification issuer re-check is what actually blocks it — see
/// the `(Issuer double-check)` property.
pub struct FixedDocumentVerifier {
    xml: &'static str,
}

impl FixedDocumentVerifier {
    pub fn new(xml: &'static str) -> Self {
        Self { xml }
    }
}

impl SignatureVerifier<TestCert> for FixedDocumentVerifier {
    fn extract_verified<'input>(
        &self,
        _xml: &'input str,
        trust_anchors: &[TestCert],
        _config: &VerifyConfig,
    ) -> SamlResult<(Document<'input>, TestCert)> {
        let document = Document::parse(self.xml)
            .map_err(|e| crate::error::SamlError::MalformedSamlResponse(e.to_string()))?;
        Ok((document, trust_anchors[0]))
    }
}
