//! `AuthnRequest` construction and HTTP-Redirect encoding.

use std::io::Write;

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use rand::RngCore;

use crate::clock::Clock;
use crate::namespaces::{
    BINDING_HTTP_POST, NAMEID_FORMAT_UNSPECIFIED, NS_SAML2_ASSERTION, NS_SAML2_PROTOCOL,
};
use crate::time::datetime_to_saml;

/// Generates a URL-safe request id with at least 128 bits of entropy,
/// used when the caller doesn't supply their own.
fn generate_request_id() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("_{}", URL_SAFE_NO_PAD.encode(bytes))
}

fn build_authn_request_xml(
    issuer: &str,
    acs_url: &str,
    request_id: &str,
    issue_instant: &str,
    force_reauthentication: bool,
) -> Vec<u8> {
    let mut writer = Writer::new(Vec::new());

    let mut authn_request = BytesStart::new("samlp:AuthnRequest");
    authn_request.push_attribute(("xmlns:samlp", NS_SAML2_PROTOCOL));
    authn_request.push_attribute(("xmlns:saml", NS_SAML2_ASSERTION));
    authn_request.push_attribute(("ID", request_id));
    authn_request.push_attribute(("Version", "2.0"));
    authn_request.push_attribute(("IssueInstant", issue_instant));
    authn_request.push_attribute(("ProtocolBinding", BINDING_HTTP_POST));
    authn_request.push_attribute(("AssertionConsumerServiceURL", acs_url));
    if force_reauthentication {
        authn_request.push_attribute(("ForceAuthn", "true"));
    }
    writer.write_event(Event::Start(authn_request)).expect("write to Vec cannot fail");

    writer
        .write_event(Event::Start(BytesStart::new("saml:Issuer")))
        .expect("write to Vec cannot fail");
    writer
        .write_event(Event::Text(BytesText::new(issuer)))
        .expect("write to Vec cannot fail");
    writer
        .write_event(Event::End(BytesEnd::new("saml:Issuer")))
        .expect("write to Vec cannot fail");

    let mut name_id_policy = BytesStart::new("samlp:NameIDPolicy");
    name_id_policy.push_attribute(("Format", NAMEID_FORMAT_UNSPECIFIED));
    writer
        .write_event(Event::Empty(name_id_policy))
        .expect("write to Vec cannot fail");

    writer
        .write_event(Event::End(BytesEnd::new("samlp:AuthnRequest")))
        .expect("write to Vec cannot fail");

    writer.into_inner()
}

/// Compresses `data` with raw DEFLATE (no zlib header/trailer, no gzip
/// framing) — the encoding the HTTP-Redirect binding requires.
fn deflate_raw(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Builds a SAML HTTP-Redirect URL carrying a fresh `AuthnRequest`.
///
/// `request_id` defaults to a freshly generated value when absent.
/// `relay_state`, when present, is passed through verbatim as the
/// `RelayState` query parameter.
pub fn build_redirect_url(
    clock: &dyn Clock,
    saml_endpoint: &str,
    expected_audience: &str,
    acs_url: &str,
    force_reauthentication: bool,
    request_id: Option<&str>,
    relay_state: Option<&str>,
) -> std::io::Result<String> {
    let owned_request_id;
    let request_id = match request_id {
        Some(id) => id,
        None => {
            owned_request_id = generate_request_id();
            &owned_request_id
        }
    };

    let issue_instant = datetime_to_saml(clock.now());
    let xml = build_authn_request_xml(
        expected_audience,
        acs_url,
        request_id,
        &issue_instant,
        force_reauthentication,
    );
    let compressed = deflate_raw(&xml)?;
    // Matches the upstream library's own choice of url-safe base64 with
    // padding for the SAMLRequest query parameter.
    let encoded = URL_SAFE.encode(&compressed);
    let url_encoded = urlencoding::encode(&encoded);

    let mut url = format!("{saml_endpoint}?SAMLRequest={url_encoded}");
    if let Some(relay_state) = relay_state {
        url.push_str("&RelayState=");
        url.push_str(&urlencoding::encode(relay_state));
    }
    Ok(url)
}
