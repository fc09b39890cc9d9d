//! Namespace-aware XML child lookup over a [`roxmltree`] document.
//!
//! Paths are simple step sequences like `./saml:Issuer` or
//! `./saml:AudienceRestriction/saml:Audience`; each step's prefix is
//! resolved against a fixed namespace map rather than whatever prefixes
//! happen to appear in the source document, since IdPs are not consistent
//! about which prefix they bind to which namespace.

use roxmltree::Node;

use crate::error::{SamlError, SamlResult};
use crate::namespaces::{NS_SAML2_ASSERTION, NS_SAML2_PROTOCOL, PREFIX_SAML, PREFIX_SAMLP};

fn resolve_prefix(prefix: &str) -> Option<&'static str> {
    match prefix {
        PREFIX_SAMLP => Some(NS_SAML2_PROTOCOL),
        PREFIX_SAML => Some(NS_SAML2_ASSERTION),
        _ => None,
    }
}

fn split_step(step: &str) -> Option<(&str, &str)> {
    step.split_once(':')
}

/// Finds the unique descendant matching `path`, starting from `element`.
/// `path` steps are direct children only (`./ns:Local/ns:Local`, no
/// wildcards, no attribute predicates).
pub fn find_or_raise<'a, 'input>(
    element: Node<'a, 'input>,
    path: &str,
) -> SamlResult<Node<'a, 'input>> {
    find_optional(element, path)?.ok_or_else(|| SamlError::ElementNotFound(path.to_string()))
}

/// Like [`find_or_raise`] but returns `Ok(None)` instead of failing when no
/// element matches.
pub fn find_optional<'a, 'input>(
    element: Node<'a, 'input>,
    path: &str,
) -> SamlResult<Option<Node<'a, 'input>>> {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    let mut current = element;
    for step in stripped.split('/') {
        let (prefix, local) = split_step(step)
            .ok_or_else(|| SamlError::ElementNotFound(format!("malformed path step: {step}")))?;
        let ns = resolve_prefix(prefix)
            .ok_or_else(|| SamlError::ElementNotFound(format!("unknown namespace prefix: {prefix}")))?;
        let found = current
            .children()
            .find(|c| c.is_element() && c.tag_name().name() == local && c.tag_name().namespace() == Some(ns));
        match found {
            Some(n) => current = n,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Finds every direct child matching a single-step path, in document order.
pub fn find_all<'a, 'input>(element: Node<'a, 'input>, step: &str) -> SamlResult<Vec<Node<'a, 'input>>> {
    let (prefix, local) = split_step(step)
        .ok_or_else(|| SamlError::ElementNotFound(format!("malformed path step: {step}")))?;
    let ns = resolve_prefix(prefix)
        .ok_or_else(|| SamlError::ElementNotFound(format!("unknown namespace prefix: {prefix}")))?;
    Ok(element
        .children()
        .filter(|c| c.is_element() && c.tag_name().name() == local && c.tag_name().namespace() == Some(ns))
        .collect())
}

/// Returns the element's required text content, or fails with
/// [`SamlError::MalformedSamlResponse`] if it carries none.
pub fn required_text(element: Node) -> SamlResult<String> {
    element
        .text()
        .map(str::to_string)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            SamlError::MalformedSamlResponse(format!(
                "element <{}> has no text content",
                element.tag_name().name()
            ))
        })
}

/// Returns a required attribute's value.
pub fn required_attr<'a>(element: Node<'a, '_>, name: &str) -> SamlResult<String> {
    element
        .attribute(name)
        .map(str::to_string)
        .ok_or_else(|| SamlError::MalformedSamlResponse(format!("missing required attribute {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion">
  <saml:Assertion>
    <saml:Issuer>https://idp.invalid</saml:Issuer>
  </saml:Assertion>
</samlp:Response>"#;

    #[test]
    fn finds_nested_element() {
        let doc = roxmltree::Document::parse(DOC).unwrap();
        let root = doc.root_element();
        let assertion = find_or_raise(root, "./saml:Assertion").unwrap();
        let issuer = find_or_raise(assertion, "./saml:Issuer").unwrap();
        assert_eq!(required_text(issuer).unwrap(), "https://idp.invalid");
    }

    #[test]
    fn missing_element_is_optional_none() {
        let doc = roxmltree::Document::parse(DOC).unwrap();
        let root = doc.root_element();
        assert!(find_optional(root, "./saml:Subject").unwrap().is_none());
    }

    #[test]
    fn missing_element_raises() {
        let doc = roxmltree::Document::parse(DOC).unwrap();
        let root = doc.root_element();
        assert!(find_or_raise(root, "./saml:Subject").is_err());
    }
}
