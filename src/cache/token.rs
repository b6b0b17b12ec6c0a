use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use std::collections::HashMap;
use std::sync::Mutex;

/// Identity a cached token is scoped to: one account on one API endpoint.
/// Tokens are never shared across keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub account: String,
    pub endpoint: String,
}

impl CacheKey {
    pub fn new(account: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// A live bearer token and the instant it stops being usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// What the vendor's token endpoint hands back on success. The lifetime is
/// protocol-declared; the cache must not assume a fixed TTL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in_secs: i64,
}

/// External collaborator that performs the actual authentication round-trip.
/// Implementations own the client credentials and the HTTP call; the cache
/// only decides when to invoke it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue_token(&self) -> Result<TokenGrant>;
}

/// In-memory cache holding at most one live token per [`CacheKey`].
///
/// Two callers missing concurrently may both authenticate; the last write
/// wins, which is benign because either token is valid for the key. The
/// mutex is never held across the authentication await, so a reader only
/// ever sees a whole token or none.
pub struct TokenCache {
    entries: Mutex<HashMap<CacheKey, AuthToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the live token for `key`, evicting it first if it has
    /// expired. `None` means the caller must authenticate.
    pub fn get(&self, key: &CacheKey) -> Option<AuthToken> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(token) if !token.is_expired() => Some(token.clone()),
            Some(_) => {
                debug!("token for {}@{} expired, evicting", key.account, key.endpoint);
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a freshly issued token under `key` for `ttl_secs` seconds.
    pub fn put(&self, key: CacheKey, access_token: impl Into<String>, ttl_secs: i64) {
        let token = AuthToken {
            access_token: access_token.into(),
            expires_at: Utc::now() + Duration::seconds(ttl_secs),
        };
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, token);
    }

    /// Drops the entry for `key`, e.g. after the transport observed a 401
    /// for a token the cache still considered live.
    pub fn invalidate(&self, key: &CacheKey) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cached token for `key`, authenticating through `issuer`
    /// only on a miss or an expired entry. Authentication failures are not
    /// cached and not retried here.
    pub async fn token(&self, key: &CacheKey, issuer: &dyn TokenIssuer) -> Result<String> {
        if let Some(token) = self.get(key) {
            debug!("token cache hit for {}@{}", key.account, key.endpoint);
            return Ok(token.access_token);
        }
        debug!(
            "token cache miss for {}@{}, authenticating",
            key.account, key.endpoint
        );
        let grant = issuer.issue_token().await?;
        self.put(key.clone(), grant.access_token.clone(), grant.expires_in_secs);
        Ok(grant.access_token)
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}
