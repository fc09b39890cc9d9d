//! Hand-built SAML response fixtures for the response validator tests.
//!
//! These mirror the scenarios a real IdP response covers without
//! depending on a real XML-DSig signature: the [`super::helpers::NullVerifier`]
//! stands in for the external verification engine the same way the
//! upstream test suite replaces its own extraction function for tests.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// A well-formed response: issuer `https://idp.invalid`, audience
/// `https://sp.invalid`, name id `user.name`, one attribute
/// `"attr name" -> "attr value"` with an extra `ExtraAttribute="hoge"`,
/// and a validity window of 2020-01-16T14:32:32Z..2020-01-16T14:34:32Z.
pub fn good_response_xml() -> String {
    format!(
        r#"<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion">
  <saml:Assertion>
    <saml:Issuer>https://idp.invalid</saml:Issuer>
    <saml:Subject>
      <saml:NameID>user.name</saml:NameID>
      <saml:SubjectConfirmation>
        <saml:SubjectConfirmationData InResponseTo="8QmO2elg5T6-GPgr7dZI7v27M-wvMXc1k76B6jleNmM"/>
      </saml:SubjectConfirmation>
    </saml:Subject>
    <saml:Conditions NotBefore="2020-01-16T14:32:32Z" NotOnOrAfter="2020-01-16T14:34:32Z">
      <saml:AudienceRestriction>
        <saml:Audience>https://sp.invalid</saml:Audience>
      </saml:AudienceRestriction>
    </saml:Conditions>
    <saml:AuthnStatement AuthnInstant="2020-01-16T14:32:32Z">
    </saml:AuthnStatement>
    <saml:AttributeStatement>
      <saml:Attribute Name="attr name" ExtraAttribute="hoge">
        <saml:AttributeValue>attr value</saml:AttributeValue>
      </saml:Attribute>
    </saml:AttributeStatement>
  </saml:Assertion>
</samlp:Response>"#
    )
}

/// A response shaped like the ones Azure AD emits: sub-millisecond
/// timestamps, validity window ending at 2013-03-18T08:48:15.128Z,
/// no attributes.
pub fn azure_ad_response_xml() -> String {
    r#"<saml:Assertion xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion">
    <saml:Issuer>https://sts.windows.net/tenant/</saml:Issuer>
    <saml:Subject>
      <saml:NameID>someone@example.com</saml:NameID>
      <saml:SubjectConfirmation>
        <saml:SubjectConfirmationData/>
      </saml:SubjectConfirmation>
    </saml:Subject>
    <saml:Conditions NotBefore="2013-03-18T08:43:15.128000Z" NotOnOrAfter="2013-03-18T08:48:15.128000Z">
      <saml:AudienceRestriction>
        <saml:Audience>https://sp.invalid</saml:Audience>
      </saml:AudienceRestriction>
    </saml:Conditions>
    <saml:AuthnStatement AuthnInstant="2013-03-18T08:43:15.128000Z"/>
  </saml:Assertion>"#
        .to_string()
}

/// A response signed over the right shape but with an unrelated root tag
/// the validator must reject outright.
pub fn wrong_root_xml() -> String {
    r#"<saml:NotARealRoot xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion"/>"#.to_string()
}

/// Same assertion as [`good_response_xml`] but with a different `<Issuer>`
/// than the one a multi-tenant dispatcher would peek at the response root
/// — used to prove the post-verification issuer re-check cannot be
/// bypassed by a forged root issuer.
pub fn good_response_with_mismatched_inner_issuer_xml() -> String {
    good_response_xml().replace("https://idp.invalid", "https://attacker.invalid")
}

pub fn encode(xml: &str) -> String {
    STANDARD.encode(xml.as_bytes())
}
