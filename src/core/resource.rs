use chrono::{DateTime, Utc};
use std::fmt;

/// Categories of cloud resources handled by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Cloud servers (virtual machines)
    Server,
    /// Machine images servers boot from
    Image,
    /// Managed load balancers
    LoadBalancer,
    /// Firewall policies and their rules
    FirewallPolicy,
    /// Mappable public IP addresses
    IpAddress,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Server => "Server",
            ResourceKind::Image => "Image",
            ResourceKind::LoadBalancer => "Load Balancer",
            ResourceKind::FirewallPolicy => "Firewall Policy",
            ResourceKind::IpAddress => "IP Address",
        }
    }

    /// Returns all resource kinds this adapter knows about.
    pub fn all() -> Vec<ResourceKind> {
        vec![
            ResourceKind::Server,
            ResourceKind::Image,
            ResourceKind::LoadBalancer,
            ResourceKind::FirewallPolicy,
            ResourceKind::IpAddress,
        ]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a server.
///
/// Every vendor status string maps to exactly one of these; strings the
/// adapter has never seen map to `Unknown`, never to a state that looks
/// operational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Being created or deleted (the vendor uses one transitional bucket for both)
    Pending,
    /// Active and reachable
    Running,
    /// Shut down but still provisioned
    Stopped,
    /// Deleted
    Terminated,
    /// Failed or unavailable
    Error,
    /// Vendor reported a status this adapter does not recognize
    Unknown,
}

impl ServerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerState::Pending => "Pending",
            ServerState::Running => "Running",
            ServerState::Stopped => "Stopped",
            ServerState::Terminated => "Terminated",
            ServerState::Error => "Error",
            ServerState::Unknown => "Unknown",
        }
    }

    /// Returns true while the server is between stable states.
    pub fn is_transitioning(&self) -> bool {
        matches!(self, ServerState::Pending)
    }

    pub fn can_start(&self) -> bool {
        matches!(self, ServerState::Stopped)
    }

    pub fn can_stop(&self) -> bool {
        matches!(self, ServerState::Running)
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a machine image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    Pending,
    Active,
    Deleted,
    /// Vendor status with no generic equivalent (e.g. failed uploads)
    Unsupported,
}

impl ImageState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageState::Pending => "Pending",
            ImageState::Active => "Active",
            ImageState::Deleted => "Deleted",
            ImageState::Unsupported => "Unsupported",
        }
    }
}

impl fmt::Display for ImageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a load balancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadBalancerState {
    Pending,
    Active,
    Terminated,
    Unsupported,
}

impl LoadBalancerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadBalancerState::Pending => "Pending",
            LoadBalancerState::Active => "Active",
            LoadBalancerState::Terminated => "Terminated",
            LoadBalancerState::Unsupported => "Unsupported",
        }
    }
}

impl fmt::Display for LoadBalancerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provider-neutral view of a cloud server.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualMachine {
    pub id: String,
    pub name: String,
    pub state: ServerState,
    pub image_id: Option<String>,
    pub zone_id: Option<String>,
    /// First mapped cloud IP, when one is attached.
    pub public_ip_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Provider-neutral view of a machine image.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineImage {
    pub id: String,
    pub name: String,
    pub state: ImageState,
    pub architecture: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Provider-neutral view of a load balancer.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadBalancer {
    pub id: String,
    pub name: String,
    pub state: LoadBalancerState,
    /// Listener ports exposed to clients.
    pub public_ports: Vec<u16>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Provider-neutral view of a mappable public IP address.
#[derive(Debug, Clone, PartialEq)]
pub struct IpAddress {
    pub id: String,
    pub address: String,
    /// Server the address is currently mapped to, if any.
    pub server_id: Option<String>,
    pub forwarding: Vec<crate::core::firewall::ForwardingRule>,
}
