//! Classification of the vendor's polymorphic endpoint strings.
//!
//! Brightbox firewall rules hold sources and destinations as bare strings
//! whose meaning is implied by shape: the literal "any", a resource id
//! ("srv-lv426"), or an address expression. This module is the single place
//! that convention is interpreted, shared by the firewall translator and
//! cloud IP matching.

use crate::core::RuleEndpoint;

/// Sentinel the vendor uses for "unrestricted".
const ANY: &str = "any";

/// Classifies a raw endpoint string. Total: first match wins and anything
/// unrecognized is treated as an address rather than an error, matching the
/// vendor's own permissiveness.
pub fn classify(raw: &str) -> RuleEndpoint {
    if raw == ANY {
        return RuleEndpoint::Global;
    }
    if is_resource_id(raw) {
        return RuleEndpoint::ResourceRef(raw.to_string());
    }
    // Residual default covers CIDR notation and anything else address-like.
    RuleEndpoint::Cidr(raw.to_string())
}

/// Renders an endpoint back into the vendor's string form. Global endpoints
/// are omitted entirely (the schema leaves the field null).
pub fn render(endpoint: &RuleEndpoint) -> Option<String> {
    match endpoint {
        RuleEndpoint::Global => None,
        RuleEndpoint::Cidr(cidr) => Some(cidr.clone()),
        RuleEndpoint::ResourceRef(id) => Some(id.clone()),
    }
}

/// True for identifiers following the provider convention: a short
/// lowercase alphabetic tag, a dash, and an alphanumeric suffix
/// ("srv-lv426", "grp-xxxxx", "lba-h9jal").
pub fn is_resource_id(raw: &str) -> bool {
    let Some((tag, suffix)) = raw.split_once('-') else {
        return false;
    };
    tag.len() == 3
        && tag.chars().all(|c| c.is_ascii_lowercase())
        && !suffix.is_empty()
        && suffix.chars().all(|c| c.is_ascii_alphanumeric())
}
