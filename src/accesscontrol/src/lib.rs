//! # Access Control Evaluator
//!
//! Decides whether a subject holds a required permission, described as a
//! composable formula over actions and scopes.
//!
//! ## Features
//!
//! - **Local evaluation** against a snapshot of granted permissions
//! - **Remote evaluation** through a relationship-based authorization service
//! - **Scope rewriting** to resolve template and attribute scopes
//! - **Prefix wildcards** in granted scopes (`dashboards:*`)
//!
//! ## Example
//!
//! ```rust
//! use accesscontrol::{Evaluator, Permission, group_scopes_by_action};
//!
//! let permissions = group_scopes_by_action(&[
//!     Permission::new("dashboards:read", "dashboards:uid:abc"),
//!     Permission::new("dashboards:read", "folders:uid:xyz*"),
//! ]);
//!
//! let evaluator = Evaluator::any(vec![
//!     Evaluator::permission_with_scopes("dashboards:read", ["dashboards:uid:other"]),
//!     Evaluator::permission_with_scopes("dashboards:read", ["folders:uid:xyz:panels:1"]),
//! ]);
//!
//! assert!(evaluator.evaluate(&permissions));
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod mutator;
pub mod remote;
pub mod scope;
pub mod types;

// Re-export commonly used types
pub use config::{RemoteConfig, ResolverCacheConfig};
pub use error::{AuthzError, Result};
pub use evaluator::{mutator_fn, Evaluator, FnMutator, PermissionEvaluator, ScopeAttributeMutator};
pub use mutator::{ScopeInjector, ScopeParams, ScopeResolvers};
pub use remote::{CheckTransport, RemoteClient};
pub use types::{group_scopes_by_action, Permission, PermissionSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
