//! Translation of actions and scopes into relations and objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AuthzError;
use crate::scope::SEPARATOR;

/// Kind of container a remote check is scoped to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Organization
    #[default]
    Org,
    /// Folder
    Folder,
}

impl ContainerKind {
    /// Returns the object type used for this container kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Org => "org",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerKind {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "org" => Ok(Self::Org),
            "folder" => Ok(Self::Folder),
            other => Err(AuthzError::Config(format!("unknown container kind: {}", other))),
        }
    }
}

/// Maps an action and scope onto the relation and object of a remote check
///
/// Implementations must be deterministic: the same inputs always produce the
/// same pair.
pub trait RelationTranslator: Send + Sync {
    /// Returns the `(relation, object)` pair for a check
    fn translate(
        &self,
        action: &str,
        scope: &str,
        container_id: &str,
        container_kind: ContainerKind,
    ) -> (String, String);
}

/// Translator used when none is configured
///
/// The relation is the verb after the last `:` of the action. An empty scope
/// (or one with a single segment) targets the container itself; otherwise the
/// object is the scope kind and identifier qualified by the container.
///
/// # Examples
///
/// ```
/// use accesscontrol::remote::{ContainerKind, DefaultTranslator, RelationTranslator};
///
/// let (relation, object) = DefaultTranslator.translate(
///     "dashboards:read",
///     "dashboards:uid:abc",
///     "1",
///     ContainerKind::Org,
/// );
/// assert_eq!(relation, "read");
/// assert_eq!(object, "dashboards:1-abc");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslator;

impl RelationTranslator for DefaultTranslator {
    fn translate(
        &self,
        action: &str,
        scope: &str,
        container_id: &str,
        container_kind: ContainerKind,
    ) -> (String, String) {
        let relation = action
            .rsplit(SEPARATOR)
            .next()
            .unwrap_or(action)
            .to_string();

        let segments: Vec<&str> = scope.split(SEPARATOR).collect();
        let object = match (segments.first(), segments.last()) {
            (Some(kind), Some(identifier)) if segments.len() > 1 => {
                format!("{}:{}-{}", kind, container_id, identifier)
            }
            _ => format!("{}:{}", container_kind, container_id),
        };

        (relation, object)
    }
}
