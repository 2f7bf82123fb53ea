//! Evaluation through the remote authorization service

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use super::{Evaluator, PermissionEvaluator};
use crate::error::Result;
use crate::remote::RemoteClient;

impl Evaluator {
    /// Checks the requirement for `subject` against the remote service
    ///
    /// Checks are issued one at a time in tree order. All-of stops at the
    /// first denied child, any-of at the first allowed one. The first error
    /// aborts the whole evaluation and is returned unchanged; nothing is
    /// retried.
    ///
    /// # Arguments
    ///
    /// * `cancel` - Cancellation token passed to every remote call
    /// * `subject` - Subject the checks are made for
    /// * `container_id` - Container (e.g. organization) the checks are scoped to
    /// * `client` - Remote check client
    pub async fn evaluate_remote(
        &self,
        cancel: &CancellationToken,
        subject: &str,
        container_id: &str,
        client: &RemoteClient,
    ) -> Result<bool> {
        self.evaluate_remote_boxed(cancel, subject, container_id, client)
            .await
    }

    fn evaluate_remote_boxed<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        subject: &'a str,
        container_id: &'a str,
        client: &'a RemoteClient,
    ) -> BoxFuture<'a, Result<bool>> {
        async move {
            match self {
                Self::Permission(p) => {
                    p.evaluate_remote(cancel, subject, container_id, client)
                        .await
                }
                Self::All(all_of) => {
                    for e in all_of {
                        if !e
                            .evaluate_remote_boxed(cancel, subject, container_id, client)
                            .await?
                        {
                            return Ok(false);
                        }
                    }
                    Ok(true)
                }
                Self::Any(any_of) => {
                    for e in any_of {
                        if e
                            .evaluate_remote_boxed(cancel, subject, container_id, client)
                            .await?
                        {
                            return Ok(true);
                        }
                    }
                    Ok(false)
                }
            }
        }
        .boxed()
    }
}

impl PermissionEvaluator {
    async fn evaluate_remote(
        &self,
        cancel: &CancellationToken,
        subject: &str,
        container_id: &str,
        client: &RemoteClient,
    ) -> Result<bool> {
        let scopes = self.scopes();

        // TODO: an empty scope only asks whether the action is allowed on the
        // container, not on any resource inside it; a list/read request would
        // answer the latter.
        if scopes.is_empty() {
            return client
                .check(cancel, subject, &self.action, "", container_id)
                .await;
        }

        for target in scopes {
            if client
                .check(cancel, subject, &self.action, target, container_id)
                .await?
            {
                return Ok(true);
            }
        }

        Ok(false)
    }
}
