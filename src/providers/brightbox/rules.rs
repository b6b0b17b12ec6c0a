//! Translation between vendor firewall rules and the generic rule model.
//!
//! The vendor rule is direction-less: whichever of source/destination is
//! populated implies the direction, the endpoint string's shape implies its
//! type, and one rule may carry several port segments. Decoding makes all
//! of that explicit; encoding is the inverse.

use crate::core::{
    Direction, Firewall, FirewallRule, Permission, PortRange, Protocol, RuleEndpoint,
};
use crate::error::{Result, StratusError};
use crate::providers::brightbox::api::model;
use crate::providers::brightbox::{ports, target};

/// ICMP message type the provider can express. Any other request must fail
/// rather than silently downgrade to echo.
const ICMP_ECHO: &str = "echo-request";

/// Decodes a policy and all of its rules into a generic firewall.
pub fn decode_policy(policy: &model::FirewallPolicy) -> Result<Firewall> {
    let mut rules = Vec::new();
    for rule in &policy.rules {
        rules.extend(decode_rule(&policy.id, rule)?);
    }
    Ok(Firewall {
        id: policy.id.clone(),
        name: policy.name.clone(),
        description: policy.description.clone(),
        rules,
    })
}

/// Decodes one vendor rule, fanning out one generic rule per port segment.
///
/// All fanned-out rules share the vendor rule id, so callers searching by id
/// must compare the full tuple. A rule carrying no port string on either
/// side is a translation error: dropping it silently would lose an access
/// grant without any signal.
pub fn decode_rule(policy_id: &str, rule: &model::FirewallRule) -> Result<Vec<FirewallRule>> {
    let source = rule.source.as_deref().map(target::classify);
    let destination = rule.destination.as_deref().map(target::classify);

    // Direction is implied by which side the vendor populated. When both or
    // neither side is present the schema gives no answer; we resolve the
    // ambiguity toward destination-based ingress so consumers always get a
    // direction.
    let direction = match (&source, &destination) {
        (Some(_), None) => Direction::Egress,
        _ => Direction::Ingress,
    };

    let protocol = decode_protocol(rule.protocol.as_deref());

    let port_string = rule
        .destination_port
        .as_deref()
        .or(rule.source_port.as_deref())
        .ok_or_else(|| {
            StratusError::translation(
                format!("firewall rule {}", rule.id),
                "rule has no port string on either side",
            )
        })?;
    let ranges = ports::decode(port_string)?;

    let source = source.unwrap_or(RuleEndpoint::Global);
    let destination = destination.unwrap_or(RuleEndpoint::Global);

    Ok(ranges
        .into_iter()
        .map(|range| FirewallRule {
            id: rule.id.clone(),
            policy_id: policy_id.to_string(),
            direction,
            protocol,
            permission: Permission::Allow,
            source: source.clone(),
            destination: destination.clone(),
            ports: range,
            icmp_type: rule.icmp_type_name.clone(),
        })
        .collect())
}

/// Maps the vendor protocol string, defaulting to TCP when the field is
/// absent or unrecognized. The default is preserved vendor behavior, not an
/// error path.
pub fn decode_protocol(protocol: Option<&str>) -> Protocol {
    match protocol {
        Some(p) if p.eq_ignore_ascii_case("udp") => Protocol::Udp,
        Some(p) if p.eq_ignore_ascii_case("icmp") => Protocol::Icmp,
        _ => Protocol::Tcp,
    }
}

/// Encodes a generic rule into the vendor's create-rule shape.
///
/// Fails fast on anything the provider cannot represent: deny rules and
/// non-echo ICMP types. The rendered port string lands on the destination
/// side for ingress rules and the source side for egress rules.
pub fn encode_rule(rule: &FirewallRule) -> Result<model::CreateFirewallRule> {
    if rule.permission == Permission::Deny {
        return Err(StratusError::unsupported(
            "DENY rules are not supported by Brightbox",
        ));
    }

    let mut out = model::CreateFirewallRule {
        firewall_policy_id: rule.policy_id.clone(),
        ..model::CreateFirewallRule::default()
    };

    out.protocol = Some(rule.protocol.as_wire_str().to_string());
    if rule.protocol == Protocol::Icmp {
        match rule.icmp_type.as_deref() {
            None | Some(ICMP_ECHO) => {
                out.icmp_type_name = Some(ICMP_ECHO.to_string());
            }
            Some(other) => {
                return Err(StratusError::unsupported(format!(
                    "ICMP type \"{}\" is not supported by Brightbox, only \"{}\"",
                    other, ICMP_ECHO
                )));
            }
        }
    }

    let port = rule.ports.to_string();
    match rule.direction {
        Direction::Ingress => out.destination_port = Some(port),
        Direction::Egress => out.source_port = Some(port),
    }

    out.source = target::render(&rule.source);
    out.destination = target::render(&rule.destination);

    Ok(out)
}

/// Builds the generic rule for an authorize call before encoding. Kept
/// separate so validation errors surface before any DTO exists.
pub fn authorize_rule(
    policy_id: &str,
    direction: Direction,
    permission: Permission,
    protocol: Protocol,
    source: RuleEndpoint,
    destination: RuleEndpoint,
    ports: PortRange,
) -> FirewallRule {
    FirewallRule {
        id: String::new(),
        policy_id: policy_id.to_string(),
        direction,
        protocol,
        permission,
        source,
        destination,
        ports,
        icmp_type: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor_rule(id: &str) -> model::FirewallRule {
        model::FirewallRule {
            id: id.to_string(),
            source: None,
            source_port: None,
            destination: None,
            destination_port: None,
            protocol: None,
            icmp_type_name: None,
            description: None,
        }
    }

    #[test]
    fn test_decode_destination_only_is_ingress() {
        let mut rule = vendor_rule("fwr-1");
        rule.destination = Some("srv-lv426".to_string());
        rule.destination_port = Some("80-90".to_string());
        rule.protocol = Some("tcp".to_string());

        let decoded = decode_rule("fwp-j3654", &rule).unwrap();
        assert_eq!(decoded.len(), 1);
        let decoded = &decoded[0];
        assert_eq!(decoded.direction, Direction::Ingress);
        assert_eq!(decoded.ports.start(), 80);
        assert_eq!(decoded.ports.end(), 90);
        assert_eq!(
            decoded.destination,
            RuleEndpoint::ResourceRef("srv-lv426".to_string())
        );
        assert_eq!(decoded.source, RuleEndpoint::Global);
    }

    #[test]
    fn test_decode_source_only_is_egress() {
        let mut rule = vendor_rule("fwr-2");
        rule.source = Some("10.0.0.0/24".to_string());
        rule.source_port = Some("443".to_string());

        let decoded = decode_rule("fwp-j3654", &rule).unwrap();
        assert_eq!(decoded[0].direction, Direction::Egress);
        assert_eq!(
            decoded[0].source,
            RuleEndpoint::Cidr("10.0.0.0/24".to_string())
        );
    }

    #[test]
    fn test_decode_both_endpoints_prefers_ingress() {
        // The schema should never populate both sides, but when it does the
        // tie breaks toward destination-based ingress.
        let mut rule = vendor_rule("fwr-3");
        rule.source = Some("any".to_string());
        rule.destination = Some("srv-lv426".to_string());
        rule.destination_port = Some("22".to_string());

        let decoded = decode_rule("fwp-j3654", &rule).unwrap();
        assert_eq!(decoded[0].direction, Direction::Ingress);
        assert_eq!(decoded[0].source, RuleEndpoint::Global);
    }

    #[test]
    fn test_decode_multi_segment_port_string_fans_out() {
        let mut rule = vendor_rule("fwr-4");
        rule.destination = Some("srv-lv426".to_string());
        rule.destination_port = Some("22,80-443,9000".to_string());

        let decoded = decode_rule("fwp-j3654", &rule).unwrap();
        assert_eq!(decoded.len(), 3);
        assert!(decoded.iter().all(|r| r.id == "fwr-4"));
        assert_eq!(decoded[0].ports, PortRange::single(22));
        assert_eq!(decoded[1].ports, PortRange::new(80, 443).unwrap());
        assert_eq!(decoded[2].ports, PortRange::single(9000));
    }

    #[test]
    fn test_decode_prefers_destination_port_over_source_port() {
        let mut rule = vendor_rule("fwr-5");
        rule.destination = Some("srv-lv426".to_string());
        rule.destination_port = Some("80".to_string());
        rule.source_port = Some("9999".to_string());

        let decoded = decode_rule("fwp-j3654", &rule).unwrap();
        assert_eq!(decoded[0].ports, PortRange::single(80));
    }

    #[test]
    fn test_decode_rule_without_ports_is_an_error() {
        let mut rule = vendor_rule("fwr-6");
        rule.destination = Some("srv-lv426".to_string());

        let err = decode_rule("fwp-j3654", &rule).unwrap_err();
        assert!(matches!(err, StratusError::TranslationFailed(_, _)));
    }

    #[test]
    fn test_decode_protocol_defaults_to_tcp() {
        // Unrecognized and absent protocols both fall back to TCP; this is
        // preserved vendor behavior.
        assert_eq!(decode_protocol(None), Protocol::Tcp);
        assert_eq!(decode_protocol(Some("gre")), Protocol::Tcp);
        assert_eq!(decode_protocol(Some("UDP")), Protocol::Udp);
        assert_eq!(decode_protocol(Some("Icmp")), Protocol::Icmp);
    }

    #[test]
    fn test_encode_rejects_deny_before_building_dto() {
        let rule = authorize_rule(
            "fwp-j3654",
            Direction::Ingress,
            Permission::Deny,
            Protocol::Tcp,
            RuleEndpoint::Global,
            RuleEndpoint::resource("srv-lv426"),
            PortRange::single(80),
        );

        let err = encode_rule(&rule).unwrap_err();
        assert!(matches!(err, StratusError::UnsupportedOperation(_)));
    }

    #[test]
    fn test_encode_ingress_puts_ports_on_destination_side() {
        let rule = authorize_rule(
            "fwp-j3654",
            Direction::Ingress,
            Permission::Allow,
            Protocol::Tcp,
            RuleEndpoint::Global,
            RuleEndpoint::resource("srv-lv426"),
            PortRange::new(80, 90).unwrap(),
        );

        let encoded = encode_rule(&rule).unwrap();
        assert_eq!(encoded.destination_port.as_deref(), Some("80-90"));
        assert_eq!(encoded.source_port, None);
        assert_eq!(encoded.destination.as_deref(), Some("srv-lv426"));
        assert_eq!(encoded.source, None);
        assert_eq!(encoded.protocol.as_deref(), Some("tcp"));
    }

    #[test]
    fn test_encode_egress_puts_ports_on_source_side() {
        let rule = authorize_rule(
            "fwp-j3654",
            Direction::Egress,
            Permission::Allow,
            Protocol::Udp,
            RuleEndpoint::cidr("10.0.0.0/24"),
            RuleEndpoint::Global,
            PortRange::single(53),
        );

        let encoded = encode_rule(&rule).unwrap();
        assert_eq!(encoded.source_port.as_deref(), Some("53"));
        assert_eq!(encoded.destination_port, None);
        assert_eq!(encoded.source.as_deref(), Some("10.0.0.0/24"));
        assert_eq!(encoded.destination, None);
    }

    #[test]
    fn test_encode_icmp_sets_echo_request() {
        let rule = authorize_rule(
            "fwp-j3654",
            Direction::Ingress,
            Permission::Allow,
            Protocol::Icmp,
            RuleEndpoint::Global,
            RuleEndpoint::resource("srv-lv426"),
            PortRange::single(0),
        );

        let encoded = encode_rule(&rule).unwrap();
        assert_eq!(encoded.protocol.as_deref(), Some("icmp"));
        assert_eq!(encoded.icmp_type_name.as_deref(), Some("echo-request"));
    }

    #[test]
    fn test_encode_non_echo_icmp_fails() {
        let mut rule = authorize_rule(
            "fwp-j3654",
            Direction::Ingress,
            Permission::Allow,
            Protocol::Icmp,
            RuleEndpoint::Global,
            RuleEndpoint::resource("srv-lv426"),
            PortRange::single(0),
        );
        rule.icmp_type = Some("destination-unreachable".to_string());

        let err = encode_rule(&rule).unwrap_err();
        assert!(matches!(err, StratusError::UnsupportedOperation(_)));
    }

    #[test]
    fn test_round_trip_single_range_rule() {
        let mut vendor = vendor_rule("fwr-7");
        vendor.destination = Some("srv-lv426".to_string());
        vendor.destination_port = Some("80-90".to_string());
        vendor.protocol = Some("tcp".to_string());

        let decoded = decode_rule("fwp-j3654", &vendor).unwrap();
        // A single range yields exactly one generic rule, not two.
        assert_eq!(decoded.len(), 1);

        let encoded = encode_rule(&decoded[0]).unwrap();
        assert_eq!(encoded.destination, vendor.destination);
        assert_eq!(encoded.destination_port, vendor.destination_port);
        assert_eq!(encoded.source, None);
        assert_eq!(encoded.source_port, None);
        assert_eq!(encoded.protocol, vendor.protocol);
    }

    #[test]
    fn test_decode_policy_collects_rule_expansions() {
        let policy = model::FirewallPolicy {
            id: "fwp-j3654".to_string(),
            name: Some("web".to_string()),
            description: None,
            is_default: false,
            rules: vec![
                {
                    let mut r = vendor_rule("fwr-a");
                    r.destination = Some("srv-lv426".to_string());
                    r.destination_port = Some("80,443".to_string());
                    r
                },
                {
                    let mut r = vendor_rule("fwr-b");
                    r.source = Some("any".to_string());
                    r.source_port = Some("25".to_string());
                    r
                },
            ],
        };

        let firewall = decode_policy(&policy).unwrap();
        assert_eq!(firewall.id, "fwp-j3654");
        assert_eq!(firewall.rules.len(), 3);
        assert_eq!(firewall.rules[2].direction, Direction::Egress);
    }

    #[test]
    fn test_decode_policy_fails_on_malformed_rule() {
        let policy = model::FirewallPolicy {
            id: "fwp-j3654".to_string(),
            name: None,
            description: None,
            is_default: false,
            rules: vec![{
                let mut r = vendor_rule("fwr-bad");
                r.destination = Some("srv-lv426".to_string());
                r.destination_port = Some("80,nope".to_string());
                r
            }],
        };

        assert!(decode_policy(&policy).is_err());
    }
}
