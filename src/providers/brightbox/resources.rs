//! Converters from vendor DTOs to the provider-neutral resource structs.

use crate::core::{IpAddress, LoadBalancer, MachineImage, VirtualMachine};
use crate::providers::brightbox::api::model;
use crate::providers::brightbox::{ips, states};

pub fn to_virtual_machine(server: &model::Server) -> VirtualMachine {
    VirtualMachine {
        id: server.id.clone(),
        name: server.name.clone().unwrap_or_else(|| server.id.clone()),
        state: states::server_state(&server.status),
        image_id: server.image.as_ref().map(|i| i.id.clone()),
        zone_id: server.zone.as_ref().map(|z| z.id.clone()),
        // Only the first mapped address is surfaced, matching what the
        // management layer expects for the primary address slot.
        public_ip_id: server.cloud_ips.first().map(|ip| ip.id.clone()),
        created_at: server.created_at,
    }
}

pub fn to_machine_image(image: &model::Image) -> MachineImage {
    MachineImage {
        id: image.id.clone(),
        name: image.name.clone().unwrap_or_else(|| image.id.clone()),
        state: states::image_state(&image.status),
        architecture: image.arch.clone(),
        created_at: image.created_at,
    }
}

pub fn to_load_balancer(lb: &model::LoadBalancer) -> LoadBalancer {
    LoadBalancer {
        id: lb.id.clone(),
        name: lb.name.clone().unwrap_or_else(|| lb.id.clone()),
        state: states::load_balancer_state(&lb.status),
        public_ports: lb.listeners.iter().map(|l| l.in_port).collect(),
        created_at: lb.created_at,
    }
}

pub fn to_ip_address(ip: &model::CloudIp) -> IpAddress {
    IpAddress {
        id: ip.id.clone(),
        address: ip.public_ip.clone(),
        server_id: ip.server.as_ref().map(|s| s.id.clone()),
        forwarding: ips::to_forwarding_rules(ip),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ImageState, LoadBalancerState, ServerState};

    #[test]
    fn test_to_virtual_machine_normalizes_status() {
        let server = model::Server {
            id: "srv-lv426".to_string(),
            name: Some("web-1".to_string()),
            status: "active".to_string(),
            image: Some(model::ImageRef {
                id: "img-3ikco".to_string(),
                source: None,
            }),
            zone: None,
            cloud_ips: vec![model::CloudIpRef {
                id: "cip-k4a25".to_string(),
                public_ip: Some("109.107.50.0".to_string()),
            }],
            created_at: None,
        };

        let vm = to_virtual_machine(&server);
        assert_eq!(vm.state, ServerState::Running);
        assert_eq!(vm.image_id.as_deref(), Some("img-3ikco"));
        assert_eq!(vm.public_ip_id.as_deref(), Some("cip-k4a25"));
    }

    #[test]
    fn test_to_virtual_machine_falls_back_to_id_for_name() {
        let server = model::Server {
            id: "srv-lv426".to_string(),
            name: None,
            status: "creating".to_string(),
            image: None,
            zone: None,
            cloud_ips: vec![],
            created_at: None,
        };

        let vm = to_virtual_machine(&server);
        assert_eq!(vm.name, "srv-lv426");
        assert_eq!(vm.state, ServerState::Pending);
    }

    #[test]
    fn test_to_machine_image() {
        let image = model::Image {
            id: "img-3ikco".to_string(),
            name: Some("ubuntu-lucid-32".to_string()),
            status: "deprecated".to_string(),
            arch: Some("i686".to_string()),
            created_at: None,
        };

        let generic = to_machine_image(&image);
        assert_eq!(generic.state, ImageState::Active);
        assert_eq!(generic.architecture.as_deref(), Some("i686"));
    }

    #[test]
    fn test_to_load_balancer_collects_listener_ports() {
        let lb = model::LoadBalancer {
            id: "lba-h9jal".to_string(),
            name: None,
            status: "creating".to_string(),
            listeners: vec![
                model::LoadBalancerListener {
                    in_port: 80,
                    out: 8080,
                    protocol: Some("http".to_string()),
                },
                model::LoadBalancerListener {
                    in_port: 443,
                    out: 8443,
                    protocol: Some("tcp".to_string()),
                },
            ],
            created_at: None,
        };

        let generic = to_load_balancer(&lb);
        assert_eq!(generic.state, LoadBalancerState::Pending);
        assert_eq!(generic.public_ports, vec![80, 443]);
    }
}
