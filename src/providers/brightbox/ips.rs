//! Cloud IP port forwarding: translating between generic forwarding rules
//! and the vendor's port translator lists.
//!
//! The vendor has no id for an individual translator, so forwarding-rule
//! ids are composed from the address id, the rendered ports, and the
//! protocol, and parsed back with the shared port codec.

use crate::core::{ForwardingRule, PortRange, Protocol};
use crate::error::{Result, StratusError};
use crate::providers::brightbox::api::model;
use crate::providers::brightbox::ports;

/// Composes the synthetic id for one translator: `cip:incoming:outgoing:proto`.
pub fn forwarding_rule_id(address_id: &str, translator: &model::PortTranslator) -> String {
    format!(
        "{}:{}:{}:{}",
        address_id,
        PortRange::single(translator.incoming),
        PortRange::single(translator.outgoing),
        translator.protocol
    )
}

/// Parses a synthetic forwarding-rule id back into its parts.
pub fn parse_forwarding_rule_id(rule_id: &str) -> Result<(String, u16, u16, String)> {
    let invalid = || {
        StratusError::translation(
            format!("forwarding rule id \"{}\"", rule_id),
            "expected address:incoming:outgoing:protocol",
        )
    };

    let parts: Vec<&str> = rule_id.split(':').collect();
    let (address_id, incoming, outgoing, protocol) = match parts.as_slice() {
        [address, incoming, outgoing, protocol] => (*address, *incoming, *outgoing, *protocol),
        _ => return Err(invalid()),
    };

    let incoming = single_port(incoming).ok_or_else(invalid)?;
    let outgoing = single_port(outgoing).ok_or_else(invalid)?;
    Ok((
        address_id.to_string(),
        incoming,
        outgoing,
        protocol.to_string(),
    ))
}

fn single_port(segment: &str) -> Option<u16> {
    match ports::decode(segment).ok()?.as_slice() {
        [range] if range.start() == range.end() => Some(range.start()),
        _ => None,
    }
}

/// Converts an address's translators into generic forwarding rules.
pub fn to_forwarding_rules(ip: &model::CloudIp) -> Vec<ForwardingRule> {
    ip.port_translators
        .iter()
        .map(|pt| ForwardingRule {
            id: forwarding_rule_id(&ip.id, pt),
            public_port: pt.incoming,
            private_port: pt.outgoing,
            protocol: translator_protocol(&pt.protocol),
        })
        .collect()
}

/// Builds the translator entry for a new forward. The vendor only supports
/// TCP and UDP translation; ICMP has no ports to translate.
pub fn new_translator(
    public_port: u16,
    private_port: u16,
    protocol: Protocol,
) -> Result<model::PortTranslator> {
    let protocol = match protocol {
        Protocol::Tcp => "tcp",
        Protocol::Udp => "udp",
        Protocol::Icmp => {
            return Err(StratusError::unsupported(
                "ICMP cannot be port-forwarded",
            ))
        }
    };
    Ok(model::PortTranslator {
        incoming: public_port,
        outgoing: private_port,
        protocol: protocol.to_string(),
    })
}

/// Returns the address's translators with the one named by `rule_id`
/// removed. Not finding a matching translator is a not-found error, never a
/// silent no-op.
pub fn remove_forwarding_rule(
    ip: &model::CloudIp,
    rule_id: &str,
) -> Result<Vec<model::PortTranslator>> {
    let (address_id, incoming, outgoing, protocol) = parse_forwarding_rule_id(rule_id)?;
    if address_id != ip.id {
        return Err(StratusError::ResourceNotFound(rule_id.to_string()));
    }

    let kept: Vec<model::PortTranslator> = ip
        .port_translators
        .iter()
        .filter(|pt| {
            !(pt.incoming == incoming && pt.outgoing == outgoing && pt.protocol == protocol)
        })
        .cloned()
        .collect();

    if kept.len() == ip.port_translators.len() {
        return Err(StratusError::ResourceNotFound(rule_id.to_string()));
    }
    Ok(kept)
}

fn translator_protocol(protocol: &str) -> Protocol {
    if protocol.eq_ignore_ascii_case("udp") {
        Protocol::Udp
    } else {
        Protocol::Tcp
    }
}
