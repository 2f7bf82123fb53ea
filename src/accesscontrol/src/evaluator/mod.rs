//! Permission requirement formulas
//!
//! An [`Evaluator`] describes a required permission as a tree of leaves
//! (an action with acceptable scopes) combined with all-of and any-of nodes.
//! The same tree can be:
//!
//! - evaluated locally against a [`PermissionSnapshot`](crate::PermissionSnapshot)
//!   with [`Evaluator::evaluate`]
//! - checked against a remote authorization service with
//!   [`Evaluator::evaluate_remote`]
//! - rewritten with [`Evaluator::mutate_scopes`] to resolve template scopes
//!
//! Trees are immutable; rewriting always builds a new tree.
//!
//! # Example
//!
//! ```
//! use accesscontrol::{Evaluator, PermissionSnapshot};
//!
//! let evaluator = Evaluator::all(vec![
//!     Evaluator::permission_with_scopes("dashboards:read", ["dashboards:uid:abc"]),
//!     Evaluator::permission("annotations:read"),
//! ]);
//!
//! let mut permissions = PermissionSnapshot::new();
//! permissions.insert("dashboards:read".into(), vec!["dashboards:*".into()]);
//! permissions.insert("annotations:read".into(), vec![]);
//!
//! assert!(evaluator.evaluate(&permissions));
//! assert_eq!(evaluator.to_string(), "all of dashboards:read, annotations:read");
//! ```

mod local;
mod mutate;
mod remote;


pub use mutate::{mutator_fn, FnMutator, ScopeAttributeMutator};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthzError, Result};

/// Requirement tree over actions and scopes
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluator {
    /// A single action with its acceptable scopes
    Permission(PermissionEvaluator),
    /// Every child must be satisfied
    All(Vec<Evaluator>),
    /// At least one child must be satisfied
    Any(Vec<Evaluator>),
}

/// Leaf requirement: an action on at least one of the listed scopes
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEvaluator {
    /// Required action
    pub action: String,

    /// Acceptable scopes
    ///
    /// `None` means no scopes were ever attached, `Some(vec![])` means scopes
    /// were attached but the list is empty. Both accept the action on any
    /// scope; only scope rewriting tells them apart.
    #[serde(default)]
    pub scopes: Option<Vec<String>>,
}

impl PermissionEvaluator {
    /// Returns the scopes of this leaf, empty if none were attached
    pub fn scopes(&self) -> &[String] {
        self.scopes.as_deref().unwrap_or_default()
    }
}

impl Evaluator {
    /// Requires `action` on any scope, with no scopes attached
    pub fn permission(action: impl Into<String>) -> Self {
        Self::Permission(PermissionEvaluator {
            action: action.into(),
            scopes: None,
        })
    }

    /// Requires `action` on at least one of `scopes`
    ///
    /// An empty list accepts the action on any scope.
    pub fn permission_with_scopes<I, S>(action: impl Into<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Permission(PermissionEvaluator {
            action: action.into(),
            scopes: Some(scopes.into_iter().map(Into::into).collect()),
        })
    }

    /// Requires every evaluator in `all_of`
    pub fn all(all_of: Vec<Evaluator>) -> Self {
        Self::All(all_of)
    }

    /// Requires at least one evaluator in `any_of`
    pub fn any(any_of: Vec<Evaluator>) -> Self {
        Self::Any(any_of)
    }

    /// Parses an evaluator from its JSON form
    ///
    /// ```
    /// use accesscontrol::Evaluator;
    ///
    /// let json = r#"{"any": [
    ///     {"permission": {"action": "dashboards:read", "scopes": ["dashboards:*"]}}
    /// ]}"#;
    /// let evaluator = Evaluator::from_json(json).unwrap();
    /// assert_eq!(
    ///     format!("{:?}", evaluator),
    ///     "any(action:dashboards:read scopes:dashboards:*)"
    /// );
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AuthzError::InvalidInput(format!("invalid evaluator: {}", e)))
    }
}

fn join(children: &[Evaluator], sep: &str, render: fn(&Evaluator) -> String) -> String {
    children.iter().map(render).collect::<Vec<_>>().join(sep)
}

/// Short description: the action of a leaf, "all of ..." or "any of ..."
impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permission(p) => write!(f, "{}", p.action),
            Self::All(all_of) => write!(f, "all of {}", join(all_of, ", ", |e| e.to_string())),
            Self::Any(any_of) => write!(f, "any of {}", join(any_of, ", ", |e| e.to_string())),
        }
    }
}

/// Structural form used in diagnostics
///
/// Children of both all-of and any-of nodes are rendered structurally, so
/// `any(...)` lists each child's scopes. Renderings that describe any-of
/// children by their short form alone differ from this one.
impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permission(p) => write!(f, "{:?}", p),
            Self::All(all_of) => write!(f, "all({})", join(all_of, " ", |e| format!("{:?}", e))),
            Self::Any(any_of) => write!(f, "any({})", join(any_of, " ", |e| format!("{:?}", e))),
        }
    }
}

impl fmt::Debug for PermissionEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action:{} scopes:{}", self.action, self.scopes().join(", "))
    }
}
