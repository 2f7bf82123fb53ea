//! Mock implementations for isolated testing

#![allow(dead_code)]

use accesscontrol::remote::{CheckRequest, CheckResponse, CheckTransport, RemoteError};
use accesscontrol::{RemoteClient, RemoteConfig};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Mock authorization service answering from a fixed tuple table
///
/// Tuples are keyed by (relation, object); every check is recorded.
#[derive(Default)]
pub struct MockTransport {
    allowed: HashMap<(String, String), bool>,
    failing: HashMap<(String, String), String>,
    requests: Mutex<Vec<CheckRequest>>,
    cancel_after: Mutex<Option<(usize, CancellationToken)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(mut self, relation: &str, object: &str) -> Self {
        self.allowed
            .insert((relation.to_string(), object.to_string()), true);
        self
    }

    pub fn fail(mut self, relation: &str, object: &str, message: &str) -> Self {
        self.failing.insert(
            (relation.to_string(), object.to_string()),
            message.to_string(),
        );
        self
    }

    /// Cancels `token` once `count` checks have been answered
    pub fn cancel_after(self, count: usize, token: CancellationToken) -> Self {
        *self.cancel_after.lock().unwrap() = Some((count, token));
        self
    }

    pub fn requests(&self) -> Vec<CheckRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn objects(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| r.tuple_key.object)
            .collect()
    }
}

#[async_trait]
impl CheckTransport for MockTransport {
    async fn check(
        &self,
        _cancel: &CancellationToken,
        request: CheckRequest,
    ) -> Result<CheckResponse, RemoteError> {
        let key = (
            request.tuple_key.relation.clone(),
            request.tuple_key.object.clone(),
        );

        let answered = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };

        if let Some((count, token)) = self.cancel_after.lock().unwrap().as_ref() {
            if answered >= *count {
                token.cancel();
            }
        }

        if let Some(message) = self.failing.get(&key) {
            return Err(RemoteError::Status {
                code: 14,
                message: message.clone(),
            });
        }

        Ok(CheckResponse {
            allowed: self.allowed.get(&key).copied().unwrap_or(false),
        })
    }
}

/// Remote client over `transport` for store "store-1" and model "model-1"
pub fn client(transport: Arc<MockTransport>) -> RemoteClient {
    RemoteClient::new(transport, RemoteConfig::new("store-1", "model-1")).unwrap()
}

/// Installs a test subscriber honoring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
