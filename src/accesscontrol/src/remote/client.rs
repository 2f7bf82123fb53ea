//! Remote check client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::translate::{DefaultTranslator, RelationTranslator};
use crate::config::RemoteConfig;
use crate::error::{AuthzError, Result};

/// Subject, relation and object of a check
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TupleKey {
    /// Subject identifier (e.g., "user:1")
    pub user: String,

    /// Relation the subject must hold
    pub relation: String,

    /// Object the relation is checked on
    pub object: String,
}

/// Request sent to the remote authorization service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Store holding the relationship tuples
    pub store_id: String,

    /// Tuple to check
    pub tuple_key: TupleKey,

    /// Authorization model to check against
    pub authorization_model_id: String,
}

/// Response from the remote authorization service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    /// Whether the subject holds the relation on the object
    pub allowed: bool,
}

/// Failures reported by a [`CheckTransport`]
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The service could not be reached
    #[error("transport error: {0}")]
    Transport(String),

    /// The service rejected the request
    #[error("service returned status {code}: {message}")]
    Status {
        /// Status code returned by the service
        code: i32,
        /// Message returned by the service
        message: String,
    },
}

/// Call boundary of the remote authorization service
///
/// Implementations own the wire encoding. The cancellation token is the
/// caller's, so long-running calls should stop when it fires.
#[async_trait]
pub trait CheckTransport: Send + Sync {
    /// Issues a single relationship check
    async fn check(
        &self,
        cancel: &CancellationToken,
        request: CheckRequest,
    ) -> std::result::Result<CheckResponse, RemoteError>;
}

/// Client issuing checks for (action, scope) pairs
///
/// Combines a transport, a translator and the process-wide remote
/// configuration. Cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct RemoteClient {
    transport: Arc<dyn CheckTransport>,
    translator: Arc<dyn RelationTranslator>,
    config: RemoteConfig,
}

impl RemoteClient {
    /// Create a client using the [`DefaultTranslator`]
    ///
    /// # Errors
    ///
    /// Returns [`AuthzError::Config`] if the configuration is invalid.
    pub fn new(transport: Arc<dyn CheckTransport>, config: RemoteConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            transport,
            translator: Arc::new(DefaultTranslator),
            config,
        })
    }

    /// Replace the translator used to build checks
    pub fn with_translator(mut self, translator: Arc<dyn RelationTranslator>) -> Self {
        self.translator = translator;
        self
    }

    /// Returns the remote configuration
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Returns the store identifier sent with every check
    pub fn store_id(&self) -> &str {
        &self.config.store_id
    }

    /// Returns the authorization model identifier sent with every check
    pub fn authorization_model_id(&self) -> &str {
        &self.config.authorization_model_id
    }

    /// Checks whether `subject` may perform `action` on `scope` within a container
    ///
    /// An empty scope asks about the action on the container as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`AuthzError::Cancelled`] if the token fired before or during
    /// the call, and [`AuthzError::Remote`] for transport failures. Nothing is
    /// retried.
    pub async fn check(
        &self,
        cancel: &CancellationToken,
        subject: &str,
        action: &str,
        scope: &str,
        container_id: &str,
    ) -> Result<bool> {
        if cancel.is_cancelled() {
            return Err(AuthzError::Cancelled);
        }

        let (relation, object) =
            self.translator
                .translate(action, scope, container_id, self.config.container_kind);

        debug!(subject, relation = %relation, object = %object, "Issuing remote check");

        let request = CheckRequest {
            store_id: self.config.store_id.clone(),
            tuple_key: TupleKey {
                user: subject.to_string(),
                relation,
                object,
            },
            authorization_model_id: self.config.authorization_model_id.clone(),
        };

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AuthzError::Cancelled),
            response = self.transport.check(cancel, request) => response?,
        };

        Ok(response.allowed)
    }
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingTransport {
        allowed: bool,
        requests: Mutex<Vec<CheckRequest>>,
    }

    #[async_trait]
    impl CheckTransport for RecordingTransport {
        async fn check(
            &self,
            _cancel: &CancellationToken,
            request: CheckRequest,
        ) -> std::result::Result<CheckResponse, RemoteError> {
            self.requests.lock().unwrap().push(request);
            Ok(CheckResponse { allowed: self.allowed })
        }
    }

    fn client(allowed: bool) -> (Arc<RecordingTransport>, RemoteClient) {
        let transport = Arc::new(RecordingTransport {
            allowed,
            requests: Mutex::new(Vec::new()),
        });
        let client = RemoteClient::new(
            transport.clone(),
            RemoteConfig::new("store-1", "model-1"),
        )
        .unwrap();
        (transport, client)
    }

    #[tokio::test]
    async fn test_check_builds_request() {
        let (transport, client) = client(true);
        let cancel = CancellationToken::new();

        let allowed = client
            .check(&cancel, "user:1", "dashboards:read", "dashboards:uid:abc", "1")
            .await
            .unwrap();

        assert!(allowed);
        let requests = transport.requests.lock().unwrap();
        assert_eq!(
            requests[0],
            CheckRequest {
                store_id: "store-1".to_string(),
                tuple_key: TupleKey {
                    user: "user:1".to_string(),
                    relation: "read".to_string(),
                    object: "dashboards:1-abc".to_string(),
                },
                authorization_model_id: "model-1".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_cancelled_token_skips_call() {
        let (transport, client) = client(true);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = client.check(&cancel, "user:1", "dashboards:read", "", "1").await;

        assert!(matches!(result, Err(AuthzError::Cancelled)));
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let transport = Arc::new(RecordingTransport {
            allowed: false,
            requests: Mutex::new(Vec::new()),
        });
        let result = RemoteClient::new(transport, RemoteConfig::default());
        assert!(matches!(result, Err(AuthzError::Config(_))));
    }
}
