//! Evaluation against a local permission snapshot

use super::{Evaluator, PermissionEvaluator};
use crate::scope;
use crate::types::PermissionSnapshot;

impl Evaluator {
    /// Evaluates the requirement against granted permissions grouped by action
    ///
    /// Pure: the same snapshot and tree always give the same answer. All-of
    /// stops at the first unmet child, any-of at the first met one.
    pub fn evaluate(&self, permissions: &PermissionSnapshot) -> bool {
        match self {
            Self::Permission(p) => p.evaluate(permissions),
            Self::All(all_of) => all_of.iter().all(|e| e.evaluate(permissions)),
            Self::Any(any_of) => any_of.iter().any(|e| e.evaluate(permissions)),
        }
    }
}

impl PermissionEvaluator {
    fn evaluate(&self, permissions: &PermissionSnapshot) -> bool {
        let Some(granted) = permissions.get(&self.action) else {
            return false;
        };

        let required = self.scopes();
        if required.is_empty() {
            return true;
        }

        required
            .iter()
            .any(|target| granted.iter().any(|g| scope::matches(g, target)))
    }
}
