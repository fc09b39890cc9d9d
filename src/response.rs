//! The response validation pipeline.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use roxmltree::Node;

use crate::clock::Clock;
use crate::error::{SamlError, SamlResult};
use crate::model::{Attribute, Response, TimeDriftLimits, ValidationConfig};
use crate::namespaces::{NS_SAML2_ASSERTION, NS_SAML2_PROTOCOL};
use crate::time::saml_to_datetime;
use crate::verifier::{SignatureVerifier, VerifyConfig};
use crate::xml::{find_all, find_optional, find_or_raise, required_attr, required_text};

/// Validates a base64-encoded SAML response and returns the projected
/// result, or the first applicable [`SamlError`].
///
/// Steps run in a fixed order: decode, verify the signature, resolve the
/// signed element to an `Assertion`, then check issuer, time window,
/// audience, and finally collect attributes. Every read after signature
/// verification happens against the verified subtree only.
pub fn validate<C: Clone>(
    data: &str,
    verifier: &dyn SignatureVerifier<C>,
    clock: &dyn Clock,
    config: &ValidationConfig<C>,
    expected_audience: &str,
    expected_issuer: &str,
) -> SamlResult<Response<C>> {
    validate_with_verify_config(
        data,
        verifier,
        clock,
        config,
        expected_audience,
        expected_issuer,
        &VerifyConfig::default_config(),
    )
}

/// Like [`validate`] but lets the caller pass through engine-specific
/// verification options.
pub fn validate_with_verify_config<C: Clone>(
    data: &str,
    verifier: &dyn SignatureVerifier<C>,
    clock: &dyn Clock,
    config: &ValidationConfig<C>,
    expected_audience: &str,
    expected_issuer: &str,
    verify_config: &VerifyConfig,
) -> SamlResult<Response<C>> {
    let xml_bytes = STANDARD
        .decode(data)
        .map_err(|e| SamlError::MalformedSamlResponse(format!("invalid base64: {e}")))?;
    let xml_str = std::str::from_utf8(&xml_bytes)
        .map_err(|e| SamlError::MalformedSamlResponse(format!("invalid utf-8: {e}")))?;

    let (document, certificate) =
        verifier.extract_verified(xml_str, &config.trust_anchors, verify_config)?;

    tracing::debug!("signature verified");

    let root = document.root_element();
    let assertion = resolve_assertion(root)?;

    let issuer = required_text(find_or_raise(assertion, "./saml:Issuer")?)?;
    if issuer != expected_issuer {
        return Err(SamlError::IssuerMismatch {
            received: issuer,
            expected: expected_issuer.to_string(),
        });
    }
    tracing::debug!("issuer checked");

    let subject = find_or_raise(assertion, "./saml:Subject")?;
    let name_id = required_text(find_or_raise(subject, "./saml:NameID")?)?;
    let subject_confirmation = find_or_raise(subject, "./saml:SubjectConfirmation")?;
    let subject_confirmation_data =
        find_or_raise(subject_confirmation, "./saml:SubjectConfirmationData")?;
    let in_response_to = subject_confirmation_data
        .attribute("InResponseTo")
        .map(str::to_string);

    let conditions = find_or_raise(assertion, "./saml:Conditions")?;
    let not_before = saml_to_datetime(&required_attr(conditions, "NotBefore")?)?;
    let not_on_or_after = saml_to_datetime(&required_attr(conditions, "NotOnOrAfter")?)?;

    check_time_window(clock, not_before, not_on_or_after, &config.allowed_time_drift)?;
    tracing::debug!("time window checked");

    let audience = required_text(find_or_raise(
        conditions,
        "./saml:AudienceRestriction/saml:Audience",
    )?)?;
    if audience != expected_audience {
        return Err(SamlError::AudienceMismatch {
            received: audience,
            expected: expected_audience.to_string(),
        });
    }
    tracing::debug!("audience checked");

    let authn_statement = find_or_raise(assertion, "./saml:AuthnStatement")?;
    let session_not_on_or_after = authn_statement
        .attribute("SessionNotOnOrAfter")
        .map(saml_to_datetime)
        .transpose()?;

    let attributes = collect_attributes(assertion)?;
    tracing::debug!(count = attributes.len(), "attributes collected");

    Ok(Response {
        issuer,
        name_id,
        audience,
        attributes,
        session_not_on_or_after,
        in_response_to,
        certificate,
    })
}

/// The verified element must be either a `<samlp:Response>` containing a
/// single `<saml:Assertion>`, or a bare `<saml:Assertion>`. Anything else
/// is rejected: a signed-but-unrelated subtree must never be read from.
fn resolve_assertion(element: Node) -> SamlResult<Node> {
    let tag = element.tag_name();
    if tag.name() == "Response" && tag.namespace() == Some(NS_SAML2_PROTOCOL) {
        find_or_raise(element, "./saml:Assertion")
    } else if tag.name() == "Assertion" && tag.namespace() == Some(NS_SAML2_ASSERTION) {
        Ok(element)
    } else {
        Err(SamlError::MalformedSamlResponse(
            "signed element is neither a Response with an Assertion, nor an Assertion".to_string(),
        ))
    }
}

fn check_time_window(
    clock: &dyn Clock,
    not_before: chrono::DateTime<chrono::Utc>,
    not_on_or_after: chrono::DateTime<chrono::Utc>,
    drift: &TimeDriftLimits,
) -> SamlResult<()> {
    let now = clock.now();

    let not_before_drift = chrono::Duration::from_std(drift.not_before_max_drift)
        .unwrap_or(chrono::Duration::zero());
    if now + not_before_drift < not_before {
        return Err(SamlError::ResponseTooEarly {
            observed: now,
            not_before,
        });
    }

    let not_on_or_after_drift = chrono::Duration::from_std(drift.not_on_or_after_max_drift)
        .unwrap_or(chrono::Duration::zero());
    if now - not_on_or_after_drift >= not_on_or_after {
        return Err(SamlError::ResponseExpired {
            observed: now,
            not_on_or_after,
        });
    }

    Ok(())
}

fn collect_attributes(assertion: Node) -> SamlResult<Vec<Attribute>> {
    let Some(attribute_statement) = find_optional(assertion, "./saml:AttributeStatement")? else {
        return Ok(Vec::new());
    };

    let mut attributes = Vec::new();
    for attribute in find_all(attribute_statement, "saml:Attribute")? {
        let name = required_attr(attribute, "Name")?;
        let format = attribute.attribute("NameFormat").map(str::to_string);
        let extra_attributes = attribute
            .attributes()
            .filter(|a| a.name() != "Name" && a.name() != "NameFormat")
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();
        let values = find_all(attribute, "saml:AttributeValue")?
            .into_iter()
            .map(|v| v.text().unwrap_or("").to_string())
            .collect();

        attributes.push(Attribute {
            name,
            values,
            format,
            extra_attributes,
        });
    }
    Ok(attributes)
}
