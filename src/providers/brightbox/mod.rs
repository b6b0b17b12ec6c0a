//! Brightbox provider: wires the token cache, the transport collaborator,
//! and the normalization layer into the operations the management layer
//! calls.

use std::sync::Arc;

use log::{debug, info};

use crate::cache::{CacheKey, TokenCache, TokenIssuer};
use crate::config::BrightboxConfig;
use crate::core::{
    Firewall, FirewallRule, IpAddress, LoadBalancer, MachineImage, Protocol, VirtualMachine,
};
use crate::error::{Result, StratusError};

pub mod api;
pub mod ips;
pub mod ports;
pub mod resources;
pub mod rules;
pub mod states;
pub mod target;

use api::model::{CreateFirewallPolicy, UpdateCloudIp};
use api::CloudApi;

pub const PROVIDER_NAME: &str = "Brightbox";

/// The adapter for one Brightbox account on one endpoint.
///
/// Holds no connection state of its own: every operation asks the token
/// cache for a bearer token (authenticating only on miss) and delegates the
/// HTTP round-trip to the [`CloudApi`] collaborator.
pub struct BrightboxProvider {
    config: BrightboxConfig,
    cache_key: CacheKey,
    tokens: TokenCache,
    issuer: Arc<dyn TokenIssuer>,
    api: Arc<dyn CloudApi>,
}

impl BrightboxProvider {
    pub fn new(
        config: BrightboxConfig,
        issuer: Arc<dyn TokenIssuer>,
        api: Arc<dyn CloudApi>,
    ) -> Self {
        let cache_key = CacheKey::new(config.account.clone(), config.endpoint.clone());
        Self {
            config,
            cache_key,
            tokens: TokenCache::new(),
            issuer,
            api,
        }
    }

    pub fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    pub fn account(&self) -> &str {
        &self.config.account
    }

    async fn token(&self) -> Result<String> {
        self.tokens.token(&self.cache_key, self.issuer.as_ref()).await
    }

    /// A credential rejection means the cached token went stale early
    /// (revoked server-side); evict it so the next call re-authenticates.
    fn evict_on_auth_failure(&self, err: StratusError) -> StratusError {
        if err.is_auth() {
            debug!("transport rejected token for {}, evicting", self.config.account);
            self.tokens.invalidate(&self.cache_key);
        }
        err
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let token = self.token().await?;
        self.api
            .list_firewall_policies(&token)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;
        Ok(true)
    }

    pub async fn list_virtual_machines(&self) -> Result<Vec<VirtualMachine>> {
        let token = self.token().await?;
        let servers = self
            .api
            .list_servers(&token)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;
        Ok(servers.iter().map(resources::to_virtual_machine).collect())
    }

    pub async fn get_virtual_machine(&self, id: &str) -> Result<VirtualMachine> {
        let token = self.token().await?;
        let server = self
            .api
            .get_server(&token, id)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;
        Ok(resources::to_virtual_machine(&server))
    }

    pub async fn list_images(&self) -> Result<Vec<MachineImage>> {
        let token = self.token().await?;
        let images = self
            .api
            .list_images(&token)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;
        Ok(images.iter().map(resources::to_machine_image).collect())
    }

    pub async fn list_load_balancers(&self) -> Result<Vec<LoadBalancer>> {
        let token = self.token().await?;
        let balancers = self
            .api
            .list_load_balancers(&token)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;
        Ok(balancers.iter().map(resources::to_load_balancer).collect())
    }

    pub async fn list_firewalls(&self) -> Result<Vec<Firewall>> {
        let token = self.token().await?;
        let policies = self
            .api
            .list_firewall_policies(&token)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;
        policies.iter().map(rules::decode_policy).collect()
    }

    pub async fn get_firewall(&self, id: &str) -> Result<Firewall> {
        let token = self.token().await?;
        let policy = self
            .api
            .get_firewall_policy(&token, id)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;
        rules::decode_policy(&policy)
    }

    /// Creates a policy and authorizes any initial rules, returning the new
    /// policy id.
    pub async fn create_firewall(
        &self,
        name: Option<String>,
        description: Option<String>,
        initial_rules: &[FirewallRule],
    ) -> Result<String> {
        let token = self.token().await?;
        let policy = self
            .api
            .create_firewall_policy(&token, CreateFirewallPolicy { name, description })
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;
        info!("created firewall policy {}", policy.id);

        for rule in initial_rules {
            let mut rule = rule.clone();
            rule.policy_id = policy.id.clone();
            self.authorize_rule(&rule).await?;
        }
        Ok(policy.id)
    }

    /// Encodes and creates one rule, returning the vendor rule id. All
    /// validation (deny rules, non-echo ICMP) happens before any DTO is
    /// sent.
    pub async fn authorize_rule(&self, rule: &FirewallRule) -> Result<String> {
        let encoded = rules::encode_rule(rule)?;
        let token = self.token().await?;
        let created = self
            .api
            .create_firewall_rule(&token, encoded)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;
        debug!("authorized rule {} on {}", created.id, rule.policy_id);
        Ok(created.id)
    }

    pub async fn revoke_rule(&self, rule_id: &str) -> Result<()> {
        let token = self.token().await?;
        self.api
            .delete_firewall_rule(&token, rule_id)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))
    }

    /// Deletes a policy, first deleting the non-default server group the
    /// policy is attached to, if any.
    pub async fn delete_firewall(&self, id: &str) -> Result<()> {
        let token = self.token().await?;
        let groups = self
            .api
            .list_server_groups(&token)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;
        for group in &groups {
            let attached = group
                .firewall_policy
                .as_ref()
                .map(|p| p.id == id)
                .unwrap_or(false);
            if !group.is_default && attached {
                self.api
                    .delete_server_group(&token, &group.id)
                    .await
                    .map_err(|e| self.evict_on_auth_failure(e))?;
                break;
            }
        }
        self.api
            .delete_firewall_policy(&token, id)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;
        info!("deleted firewall policy {}", id);
        Ok(())
    }

    pub async fn list_ip_addresses(&self) -> Result<Vec<IpAddress>> {
        let token = self.token().await?;
        let addresses = self
            .api
            .list_cloud_ips(&token)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;
        Ok(addresses.iter().map(resources::to_ip_address).collect())
    }

    /// Adds a port forward on an address, returning the synthetic
    /// forwarding-rule id.
    pub async fn forward_port(
        &self,
        address_id: &str,
        public_port: u16,
        protocol: Protocol,
        private_port: u16,
    ) -> Result<String> {
        let translator = ips::new_translator(public_port, private_port, protocol)?;
        let token = self.token().await?;
        let ip = self
            .api
            .get_cloud_ip(&token, address_id)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;

        let rule_id = ips::forwarding_rule_id(&ip.id, &translator);
        let mut translators = ip.port_translators.clone();
        translators.push(translator);
        self.api
            .update_cloud_ip(
                &token,
                address_id,
                UpdateCloudIp {
                    reverse_dns: None,
                    name: None,
                    port_translators: translators,
                },
            )
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;
        Ok(rule_id)
    }

    /// Removes the forward named by a synthetic rule id. Missing rules are
    /// a not-found error, not a silent no-op.
    pub async fn stop_forward(&self, rule_id: &str) -> Result<()> {
        let (address_id, _, _, _) = ips::parse_forwarding_rule_id(rule_id)?;
        let token = self.token().await?;
        let ip = self
            .api
            .get_cloud_ip(&token, &address_id)
            .await
            .map_err(|e| self.evict_on_auth_failure(e))?;

        let kept = ips::remove_forwarding_rule(&ip, rule_id)?;
        self.api
            .update_cloud_ip(
                &token,
                &address_id,
                UpdateCloudIp {
                    reverse_dns: None,
                    name: None,
                    port_translators: kept,
                },
            )
            .await
            .map_err(|e| self.evict_on_auth_failure(e))
    }
}
