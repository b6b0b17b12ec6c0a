pub mod firewall;
pub mod resource;

pub use firewall::{
    Direction, Firewall, FirewallRule, ForwardingRule, Permission, PortRange, Protocol,
    RuleEndpoint,
};
pub use resource::{
    ImageState, IpAddress, LoadBalancer, LoadBalancerState, MachineImage, ResourceKind,
    ServerState, VirtualMachine,
};
