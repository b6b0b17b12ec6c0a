use crate::error::{Result, StratusError};
use std::fmt;

/// Traffic direction of a firewall rule.
///
/// The vendor never stores this; it is derived from which endpoint field of
/// a vendor rule is populated, so the generic model is the only place it
/// exists explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ingress,
    Egress,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ingress => "Ingress",
            Direction::Egress => "Egress",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Protocols the provider can represent in a firewall rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
    Icmp,
}

impl Protocol {
    /// Lowercase wire form used by the vendor API.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
            Protocol::Icmp => "icmp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

/// Whether a rule allows or denies matching traffic. The provider only
/// supports Allow; Deny exists so callers get a typed rejection instead of
/// a silently dropped rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Allow,
    Deny,
}

/// An inclusive port interval. `start == end` denotes a single port and
/// renders as a bare integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    pub fn new(start: u16, end: u16) -> Result<Self> {
        if start > end {
            return Err(StratusError::InvalidPortRange(
                format!("{}-{}", start, end),
                "start port is greater than end port".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn single(port: u16) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// What a rule's source or destination refers to.
///
/// The vendor encodes all three shapes in one string field; classification
/// back into a tagged variant lives in the provider's disambiguator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleEndpoint {
    /// Unrestricted ("any")
    Global,
    /// An address range, e.g. "10.0.0.0/24"
    Cidr(String),
    /// A specific provider resource, e.g. a server id
    ResourceRef(String),
}

impl RuleEndpoint {
    pub fn cidr(value: impl Into<String>) -> Self {
        RuleEndpoint::Cidr(value.into())
    }

    pub fn resource(id: impl Into<String>) -> Self {
        RuleEndpoint::ResourceRef(id.into())
    }
}

/// A provider-neutral firewall allow-rule.
///
/// One vendor rule with a multi-segment port string expands into several of
/// these sharing the same `id`, so `id` alone does not identify a rule;
/// compare the full tuple when searching.
#[derive(Debug, Clone, PartialEq)]
pub struct FirewallRule {
    pub id: String,
    pub policy_id: String,
    pub direction: Direction,
    pub protocol: Protocol,
    pub permission: Permission,
    pub source: RuleEndpoint,
    pub destination: RuleEndpoint,
    pub ports: PortRange,
    /// ICMP message type; the provider can only represent "echo-request".
    pub icmp_type: Option<String>,
}

/// A firewall policy with its decoded rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Firewall {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub rules: Vec<FirewallRule>,
}

/// A NAT entry forwarding one public port to one private port on the server
/// an address is mapped to.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardingRule {
    pub id: String,
    pub public_port: u16,
    pub private_port: u16,
    pub protocol: Protocol,
}
