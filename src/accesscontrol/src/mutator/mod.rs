//! Scope mutators used with [`Evaluator::mutate_scopes`](crate::Evaluator::mutate_scopes)
//!
//! - [`ScopeInjector`] fills template placeholders from request parameters
//! - [`ScopeResolvers`] maps scopes to equivalent scopes through registered
//!   resolvers, with caching

mod injector;
mod registry;

pub use injector::{ScopeInjector, ScopeParams};
pub use registry::{CacheStats, OrgScopeMutator, ScopeAttributeResolver, ScopeResolvers};
