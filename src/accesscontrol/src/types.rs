//! Core access control types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Granted scopes of a subject, grouped by action
///
/// Supplied by the caller for each evaluation and only ever read.
pub type PermissionSnapshot = HashMap<String, Vec<String>>;

/// A single granted permission
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// Action identifier (e.g., "dashboards:read")
    pub action: String,

    /// Scope the action is granted on (e.g., "dashboards:uid:abc")
    #[serde(default)]
    pub scope: String,
}

impl Permission {
    /// Create a new permission
    pub fn new(action: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            scope: scope.into(),
        }
    }
}

/// Groups permissions into a snapshot keyed by action
///
/// Scopes keep their original order; repeated scopes for the same action
/// are kept once.
pub fn group_scopes_by_action(permissions: &[Permission]) -> PermissionSnapshot {
    let mut snapshot: PermissionSnapshot = HashMap::new();

    for permission in permissions {
        let scopes = snapshot.entry(permission.action.clone()).or_default();
        if !scopes.contains(&permission.scope) {
            scopes.push(permission.scope.clone());
        }
    }

    snapshot
}
