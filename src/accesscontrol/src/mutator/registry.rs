//! Scope resolver registry with TTL caching
//!
//! Resolvers are registered per scope prefix (e.g. `dashboards:id:`) and
//! turn a scope using one attribute into scopes using another, such as a
//! dashboard id into its uid. Results are cached per organization.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ResolverCacheConfig;
use crate::error::{AuthzError, Result};
use crate::evaluator::ScopeAttributeMutator;
use crate::scope::scope_prefix;

/// Resolves scopes sharing a prefix into equivalent scopes
#[async_trait]
pub trait ScopeAttributeResolver: Send + Sync {
    /// Returns the scopes equivalent to `scope` within `org_id`
    async fn resolve(
        &self,
        cancel: &CancellationToken,
        org_id: i64,
        scope: &str,
    ) -> Result<Vec<String>>;
}

/// Cache entry with TTL
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    /// Cached value
    value: T,
    /// Timestamp when entry was created
    created_at: Instant,
    /// Time-to-live duration
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }

    /// Returns the value if not expired, None otherwise
    fn get(&self) -> Option<&T> {
        if self.is_expired() {
            None
        } else {
            Some(&self.value)
        }
    }
}

/// Statistics about cache performance
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Number of expired entries encountered
    pub expirations: usize,
    /// Total number of entries in cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Registry of scope resolvers keyed by scope prefix
///
/// Thread-safe; share it behind an `Arc`. Use [`ScopeResolvers::mutator`]
/// to obtain a [`ScopeAttributeMutator`] for one organization.
///
/// # Examples
///
/// ```
/// use accesscontrol::mutator::ScopeResolvers;
///
/// let resolvers = ScopeResolvers::new();
/// assert_eq!(resolvers.stats().entries, 0);
/// ```
pub struct ScopeResolvers {
    /// Resolvers by scope prefix
    resolvers: DashMap<String, Arc<dyn ScopeAttributeResolver>>,
    /// Resolved scopes by org and scope
    cache: DashMap<(i64, String), CacheEntry<Vec<String>>>,
    /// Cache TTL duration
    ttl: Duration,
    /// Cache statistics
    stats: DashMap<&'static str, usize>,
}

impl Default for ScopeResolvers {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeResolvers {
    /// Creates an empty registry with the default cache TTL
    pub fn new() -> Self {
        Self::with_config(ResolverCacheConfig::default())
    }

    /// Creates an empty registry with a custom cache configuration
    pub fn with_config(config: ResolverCacheConfig) -> Self {
        Self {
            resolvers: DashMap::new(),
            cache: DashMap::new(),
            ttl: config.ttl,
            stats: DashMap::new(),
        }
    }

    /// Registers a resolver for every scope starting with `prefix`
    ///
    /// A later registration for the same prefix replaces the earlier one.
    pub fn add_resolver(
        &self,
        prefix: impl Into<String>,
        resolver: Arc<dyn ScopeAttributeResolver>,
    ) {
        let prefix = prefix.into();
        debug!(prefix = %prefix, "Registered scope resolver");
        self.resolvers.insert(prefix, resolver);
    }

    /// Returns a mutator resolving scopes within `org_id`
    pub fn mutator(&self, org_id: i64) -> OrgScopeMutator<'_> {
        OrgScopeMutator {
            resolvers: self,
            org_id,
        }
    }

    async fn resolve(
        &self,
        cancel: &CancellationToken,
        org_id: i64,
        scope: &str,
    ) -> Result<Vec<String>> {
        let prefix = scope_prefix(scope);
        let Some(resolver) = self.resolvers.get(&prefix).map(|r| Arc::clone(r.value())) else {
            return Err(AuthzError::ResolverNotFound);
        };

        let cache_key = (org_id, scope.to_string());

        if let Some(entry) = self.cache.get(&cache_key) {
            if let Some(scopes) = entry.get() {
                self.increment_stat("hits");
                return Ok(scopes.clone());
            }
        }

        if self
            .cache
            .remove_if(&cache_key, |_, entry| entry.is_expired())
            .is_some()
        {
            self.increment_stat("expirations");
        } else {
            self.increment_stat("misses");
            self.cleanup_expired();
        }

        let scopes = resolver.resolve(cancel, org_id, scope).await?;
        debug!(scope, ?scopes, "Resolved scope");

        self.cache
            .insert(cache_key, CacheEntry::new(scopes.clone(), self.ttl));

        Ok(scopes)
    }

    /// Clears the cache
    pub fn clear_cache(&self) {
        self.cache.clear();
        self.stats.clear();
    }

    /// Removes expired entries from the cache
    pub fn cleanup_expired(&self) {
        self.cache.retain(|_, entry| !entry.is_expired());
    }

    /// Returns cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.get_stat("hits"),
            misses: self.get_stat("misses"),
            expirations: self.get_stat("expirations"),
            entries: self.cache.len(),
        }
    }

    fn increment_stat(&self, key: &'static str) {
        self.stats
            .entry(key)
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    fn get_stat(&self, key: &'static str) -> usize {
        self.stats.get(key).map(|v| *v).unwrap_or(0)
    }
}

/// [`ScopeAttributeMutator`] resolving scopes for a single organization
pub struct OrgScopeMutator<'a> {
    resolvers: &'a ScopeResolvers,
    org_id: i64,
}

#[async_trait]
impl ScopeAttributeMutator for OrgScopeMutator<'_> {
    async fn mutate(&self, cancel: &CancellationToken, scope: &str) -> Result<Vec<String>> {
        self.resolvers.resolve(cancel, self.org_id, scope).await
    }
}
