use crate::error::Result;
use async_trait::async_trait;

pub mod model;

use model::{
    CloudIp, CreateFirewallPolicy, CreateFirewallRule, FirewallPolicy, FirewallRule, Image,
    LoadBalancer, Server, ServerGroup, UpdateCloudIp,
};

/// Transport collaborator exposing the vendor's REST operations.
///
/// Implementations own HTTP, serialization, and timeout concerns and map
/// HTTP failures onto the crate error kinds (401 → `AuthenticationFailed`,
/// 404 → `ResourceNotFound`). The adapter core never performs I/O itself;
/// it supplies the bearer token per call and transforms the DTOs.
#[async_trait]
pub trait CloudApi: Send + Sync {
    async fn list_servers(&self, token: &str) -> Result<Vec<Server>>;
    async fn get_server(&self, token: &str, id: &str) -> Result<Server>;

    async fn list_images(&self, token: &str) -> Result<Vec<Image>>;

    async fn list_load_balancers(&self, token: &str) -> Result<Vec<LoadBalancer>>;

    async fn list_firewall_policies(&self, token: &str) -> Result<Vec<FirewallPolicy>>;
    async fn get_firewall_policy(&self, token: &str, id: &str) -> Result<FirewallPolicy>;
    async fn create_firewall_policy(
        &self,
        token: &str,
        policy: CreateFirewallPolicy,
    ) -> Result<FirewallPolicy>;
    async fn delete_firewall_policy(&self, token: &str, id: &str) -> Result<()>;
    async fn create_firewall_rule(
        &self,
        token: &str,
        rule: CreateFirewallRule,
    ) -> Result<FirewallRule>;
    async fn delete_firewall_rule(&self, token: &str, id: &str) -> Result<()>;

    async fn list_server_groups(&self, token: &str) -> Result<Vec<ServerGroup>>;
    async fn delete_server_group(&self, token: &str, id: &str) -> Result<()>;

    async fn list_cloud_ips(&self, token: &str) -> Result<Vec<CloudIp>>;
    async fn get_cloud_ip(&self, token: &str, id: &str) -> Result<CloudIp>;
    async fn update_cloud_ip(&self, token: &str, id: &str, update: UpdateCloudIp) -> Result<()>;
}
