//! Scope rewriting

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::{Evaluator, PermissionEvaluator};
use crate::error::{AuthzError, Result};

/// Resolves a single scope into its replacement scopes
///
/// Returning [`AuthzError::ResolverNotFound`] means the scope is not
/// understood by this mutator and is kept verbatim. Any other error aborts
/// the rewrite. A mutator may perform I/O and is called once per scope.
#[async_trait]
pub trait ScopeAttributeMutator: Send + Sync {
    /// Returns the scopes replacing `scope`
    async fn mutate(&self, cancel: &CancellationToken, scope: &str) -> Result<Vec<String>>;
}

/// Mutator backed by a synchronous function
///
/// Built with [`mutator_fn`].
#[derive(Clone)]
pub struct FnMutator<F> {
    f: F,
}

/// Wraps a synchronous function as a [`ScopeAttributeMutator`]
///
/// ```
/// use accesscontrol::{mutator_fn, AuthzError};
///
/// let mutator = mutator_fn(|scope: &str| match scope.strip_prefix("dashboards:id:") {
///     Some(id) => Ok(vec![format!("dashboards:uid:{}", id)]),
///     None => Err(AuthzError::ResolverNotFound),
/// });
/// # let _ = mutator;
/// ```
pub fn mutator_fn<F>(f: F) -> FnMutator<F>
where
    F: Fn(&str) -> Result<Vec<String>> + Send + Sync,
{
    FnMutator { f }
}

#[async_trait]
impl<F> ScopeAttributeMutator for FnMutator<F>
where
    F: Fn(&str) -> Result<Vec<String>> + Send + Sync,
{
    async fn mutate(&self, _cancel: &CancellationToken, scope: &str) -> Result<Vec<String>> {
        (self.f)(scope)
    }
}

impl Evaluator {
    /// Builds a new evaluator with every scope passed through `mutator`
    ///
    /// Scopes the mutator does not understand are kept as they are, and so
    /// are subtrees in which nothing was resolved. Leaves without attached
    /// scopes are copied without calling the mutator.
    ///
    /// # Errors
    ///
    /// Returns [`AuthzError::ResolverNotFound`] if nothing in the tree was
    /// resolved. Whether that matters is up to the caller. Other mutator
    /// errors, and [`AuthzError::Cancelled`], abort the rewrite.
    pub async fn mutate_scopes(
        &self,
        cancel: &CancellationToken,
        mutator: &dyn ScopeAttributeMutator,
    ) -> Result<Evaluator> {
        self.mutate_scopes_boxed(cancel, mutator).await
    }

    fn mutate_scopes_boxed<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        mutator: &'a dyn ScopeAttributeMutator,
    ) -> BoxFuture<'a, Result<Evaluator>> {
        async move {
            match self {
                Self::Permission(p) => p.mutate_scopes(cancel, mutator).await,
                Self::All(all_of) => Ok(Self::All(mutate_children(all_of, cancel, mutator).await?)),
                Self::Any(any_of) => Ok(Self::Any(mutate_children(any_of, cancel, mutator).await?)),
            }
        }
        .boxed()
    }
}

async fn mutate_children(
    children: &[Evaluator],
    cancel: &CancellationToken,
    mutator: &dyn ScopeAttributeMutator,
) -> Result<Vec<Evaluator>> {
    let mut resolved = false;
    let mut modified = Vec::with_capacity(children.len());

    for e in children {
        match e.mutate_scopes_boxed(cancel, mutator).await {
            Ok(mutated) => {
                resolved = true;
                modified.push(mutated);
            }
            Err(AuthzError::ResolverNotFound) => modified.push(e.clone()),
            Err(err) => return Err(err),
        }
    }

    if !resolved {
        return Err(AuthzError::ResolverNotFound);
    }

    Ok(modified)
}

impl PermissionEvaluator {
    async fn mutate_scopes(
        &self,
        cancel: &CancellationToken,
        mutator: &dyn ScopeAttributeMutator,
    ) -> Result<Evaluator> {
        let Some(scopes) = &self.scopes else {
            return Ok(Evaluator::permission(self.action.clone()));
        };

        let mut resolved = false;
        let mut mutated_scopes = Vec::with_capacity(scopes.len());

        for scope in scopes {
            if cancel.is_cancelled() {
                return Err(AuthzError::Cancelled);
            }

            match mutator.mutate(cancel, scope).await {
                Ok(mutated) => {
                    trace!(scope = %scope, ?mutated, "Resolved scope");
                    resolved = true;
                    mutated_scopes.extend(mutated);
                }
                Err(AuthzError::ResolverNotFound) => mutated_scopes.push(scope.clone()),
                Err(err) => return Err(err),
            }
        }

        if !resolved {
            return Err(AuthzError::ResolverNotFound);
        }

        Ok(Evaluator::permission_with_scopes(self.action.clone(), mutated_scopes))
    }
}
