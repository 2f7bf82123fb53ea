//! Configuration for remote checks and scope resolution
//!
//! Environment variables:
//! - `AUTHZ_STORE_ID` - Remote authorization store identifier
//! - `AUTHZ_MODEL_ID` - Remote authorization model identifier
//! - `AUTHZ_CONTAINER_KIND` - Container kind used for scoping checks (default: org)
//! - `AUTHZ_RESOLVER_CACHE_TTL` - Scope resolver cache TTL in seconds (default: 30)

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AuthzError, Result};
use crate::remote::ContainerKind;

/// Default scope resolver cache TTL (30 seconds)
pub const DEFAULT_RESOLVER_CACHE_TTL: Duration = Duration::from_secs(30);

/// Remote authorization service configuration
///
/// Resolved once per process and read-only while evaluating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Store holding the relationship tuples
    pub store_id: String,

    /// Authorization model the checks are evaluated against
    #[serde(default)]
    pub authorization_model_id: String,

    /// Kind of container the checks are scoped to
    #[serde(default)]
    pub container_kind: ContainerKind,
}

impl RemoteConfig {
    /// Create a new configuration for the given store and model
    pub fn new(store_id: impl Into<String>, authorization_model_id: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            authorization_model_id: authorization_model_id.into(),
            container_kind: ContainerKind::default(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let store_id = std::env::var("AUTHZ_STORE_ID").unwrap_or_default();
        let authorization_model_id = std::env::var("AUTHZ_MODEL_ID").unwrap_or_default();
        let container_kind = match std::env::var("AUTHZ_CONTAINER_KIND") {
            Ok(kind) => kind.parse()?,
            Err(_) => ContainerKind::default(),
        };

        let config = Self {
            store_id,
            authorization_model_id,
            container_kind,
        };
        config.validate()?;

        Ok(config)
    }

    /// Check that the configuration can be used for remote checks
    pub fn validate(&self) -> Result<()> {
        if self.store_id.trim().is_empty() {
            return Err(AuthzError::Config("store id must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Scope resolver cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverCacheConfig {
    /// Time-to-live of a resolved scope
    pub ttl: Duration,
}

impl Default for ResolverCacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_RESOLVER_CACHE_TTL,
        }
    }
}

impl ResolverCacheConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let ttl = match std::env::var("AUTHZ_RESOLVER_CACHE_TTL") {
            Ok(secs) => secs.trim().parse().map(Duration::from_secs).map_err(|e| {
                AuthzError::Config(format!("invalid AUTHZ_RESOLVER_CACHE_TTL {:?}: {}", secs, e))
            })?,
            Err(_) => DEFAULT_RESOLVER_CACHE_TTL,
        };

        Ok(Self { ttl })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_store() {
        let config = RemoteConfig::new("  ", "model-1");
        assert!(matches!(config.validate(), Err(AuthzError::Config(_))));

        let config = RemoteConfig::new("store-1", "model-1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: RemoteConfig = serde_json::from_str(r#"{"store_id": "store-1"}"#).unwrap();
        assert_eq!(config.store_id, "store-1");
        assert_eq!(config.authorization_model_id, "");
        assert_eq!(config.container_kind, ContainerKind::Org);
    }

    #[test]
    fn test_resolver_cache_default_ttl() {
        assert_eq!(ResolverCacheConfig::default().ttl, DEFAULT_RESOLVER_CACHE_TTL);
    }

    // Environment variables are process-wide, so every env case runs in this
    // one test.
    #[test]
    fn test_from_env() {
        for var in [
            "AUTHZ_STORE_ID",
            "AUTHZ_MODEL_ID",
            "AUTHZ_CONTAINER_KIND",
            "AUTHZ_RESOLVER_CACHE_TTL",
        ] {
            std::env::remove_var(var);
        }

        assert!(matches!(RemoteConfig::from_env(), Err(AuthzError::Config(_))));
        assert_eq!(ResolverCacheConfig::from_env().unwrap().ttl, DEFAULT_RESOLVER_CACHE_TTL);

        std::env::set_var("AUTHZ_STORE_ID", "store-1");
        std::env::set_var("AUTHZ_MODEL_ID", "model-1");
        let config = RemoteConfig::from_env().unwrap();
        assert_eq!(config, RemoteConfig::new("store-1", "model-1"));

        std::env::set_var("AUTHZ_CONTAINER_KIND", "folder");
        assert_eq!(RemoteConfig::from_env().unwrap().container_kind, ContainerKind::Folder);

        std::env::set_var("AUTHZ_CONTAINER_KIND", "team");
        assert!(matches!(RemoteConfig::from_env(), Err(AuthzError::Config(_))));

        std::env::set_var("AUTHZ_RESOLVER_CACHE_TTL", "5");
        assert_eq!(ResolverCacheConfig::from_env().unwrap().ttl, Duration::from_secs(5));

        std::env::set_var("AUTHZ_RESOLVER_CACHE_TTL", "5s");
        let err = ResolverCacheConfig::from_env().unwrap_err();
        assert!(matches!(err, AuthzError::Config(_)));
        assert!(err.to_string().contains("AUTHZ_RESOLVER_CACHE_TTL"));

        for var in [
            "AUTHZ_STORE_ID",
            "AUTHZ_MODEL_ID",
            "AUTHZ_CONTAINER_KIND",
            "AUTHZ_RESOLVER_CACHE_TTL",
        ] {
            std::env::remove_var(var);
        }
    }
}
