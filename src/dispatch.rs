//! Multi-tenant dispatch: resolve trust configuration from the response's
//! unverified issuer, then delegate to [`crate::response::validate`].
//!
//! Two entry points are exposed rather than one polymorphic symbol,
//! because a single function whose return shape depends on whether the
//! caller's resolver is synchronous or asynchronous doesn't translate into
//! a statically typed API. [`validate_multi_tenant_sync`] runs the
//! resolver and the validator back-to-back with nothing to await;
//! [`validate_multi_tenant_async`] awaits an arbitrary resolver future
//! first.

use std::future::Future;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use roxmltree::Document;

use crate::clock::Clock;
use crate::error::SamlError;
use crate::model::{Response, ValidationConfig};
use crate::namespaces::{NS_SAML2_ASSERTION, NS_SAML2_PROTOCOL};
use crate::response::validate;
use crate::verifier::SignatureVerifier;
use crate::xml::find_or_raise;

/// Failure from a multi-tenant dispatch: either the caller's resolver
/// failed (with its own error type, carried unchanged), or the resolved
/// config failed validation.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError<E> {
    #[error("trust config resolution failed")]
    Resolver(E),
    #[error(transparent)]
    Validation(#[from] SamlError),
}

/// Reads the unverified `<Issuer>` from a base64-encoded SAML response,
/// without checking its signature. Used only to pick a trust
/// configuration; the signed assertion's own `Issuer` is re-checked by
/// [`crate::response::validate`] once the real config is known, so a
/// forged issuer here can only ever steer dispatch to the wrong config,
/// never bypass the check.
fn peek_unverified_issuer(data: &str) -> Result<String, SamlError> {
    let xml_bytes = STANDARD
        .decode(data)
        .map_err(|e| SamlError::MalformedSamlResponse(format!("invalid base64: {e}")))?;
    let xml_str = std::str::from_utf8(&xml_bytes)
        .map_err(|e| SamlError::MalformedSamlResponse(format!("invalid utf-8: {e}")))?;
    let document = Document::parse(xml_str)
        .map_err(|e| SamlError::MalformedSamlResponse(format!("invalid xml: {e}")))?;

    let root = document.root_element();
    let tag = root.tag_name();
    let assertion = if tag.name() == "Response" && tag.namespace() == Some(NS_SAML2_PROTOCOL) {
        find_or_raise(root, "./saml:Assertion")?
    } else if tag.name() == "Assertion" && tag.namespace() == Some(NS_SAML2_ASSERTION) {
        root
    } else {
        return Err(SamlError::MalformedSamlResponse(
            "root element is neither a Response nor an Assertion".to_string(),
        ));
    };

    let issuer = find_or_raise(assertion, "./saml:Issuer")?;
    issuer
        .text()
        .map(str::to_string)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SamlError::MalformedSamlResponse("Issuer has no text content".to_string()))
}

/// Validates `data` against a trust configuration chosen by `resolve`,
/// which is invoked synchronously with the unverified issuer and returns
/// both the config to validate against and an arbitrary state value `S`
/// threaded through to the result.
pub fn validate_multi_tenant_sync<C, S, E>(
    data: &str,
    verifier: &dyn SignatureVerifier<C>,
    clock: &dyn Clock,
    expected_audience: &str,
    resolve: impl FnOnce(&str) -> Result<(ValidationConfig<C>, S), E>,
) -> Result<(Response<C>, S), DispatchError<E>>
where
    C: Clone,
{
    let unverified_issuer = peek_unverified_issuer(data)?;
    let (config, state) = resolve(&unverified_issuer).map_err(DispatchError::Resolver)?;
    let response = validate(
        data,
        verifier,
        clock,
        &config,
        expected_audience,
        &unverified_issuer,
    )?;
    Ok((response, state))
}

/// Like [`validate_multi_tenant_sync`] but `resolve` returns a future.
/// Dropping the returned future before it resolves drops the in-flight
/// resolver future with it, which is ordinary `Future`/`Drop`
/// cancellation — no extra bookkeeping is needed to make cancellation
/// propagate.
pub async fn validate_multi_tenant_async<C, S, E, Fut>(
    data: &str,
    verifier: &dyn SignatureVerifier<C>,
    clock: &dyn Clock,
    expected_audience: &str,
    resolve: impl FnOnce(String) -> Fut,
) -> Result<(Response<C>, S), DispatchError<E>>
where
    C: Clone,
    Fut: Future<Output = Result<(ValidationConfig<C>, S), E>>,
{
    let unverified_issuer = peek_unverified_issuer(data)?;
    let (config, state) = resolve(unverified_issuer.clone())
        .await
        .map_err(DispatchError::Resolver)?;
    let response = validate(
        data,
        verifier,
        clock,
        &config,
        expected_audience,
        &unverified_issuer,
    )?;
    Ok((response, state))
}
