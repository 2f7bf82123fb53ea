//! Scope validation and matching
//!
//! A granted scope matches a required scope either exactly or, when the
//! granted scope ends with `*`, by prefix.

use tracing::{debug, warn};

/// Wildcard character, only meaningful as the last character of a scope
pub const WILDCARD: char = '*';

const INVALID_SCOPE_REASON: &str =
    "scopes should not contain the wildcard character, except in the last position";

/// Checks that a scope only uses the wildcard in its last position
///
/// # Examples
///
/// ```
/// use accesscontrol::scope::validate_scope;
///
/// assert!(validate_scope("dashboards:uid:*"));
/// assert!(validate_scope("dashboards:uid:abc"));
/// assert!(!validate_scope("dashboards:*:abc"));
/// ```
pub fn validate_scope(scope: &str) -> bool {
    let prefix = scope.strip_suffix(WILDCARD).unwrap_or(scope);
    !prefix.contains(WILDCARD)
}

/// Checks whether a granted scope covers a required scope
///
/// Comparison is byte-wise and case-sensitive. An invalid granted scope is
/// logged and never matches.
///
/// # Arguments
///
/// * `granted` - Scope held by the subject, possibly ending in `*`
/// * `required` - Scope the requirement asks for
///
/// # Examples
///
/// ```
/// use accesscontrol::scope::matches;
///
/// assert!(matches("folders:uid:xyz*", "folders:uid:xyz:panels:1"));
/// assert!(matches("dashboards:uid:abc", "dashboards:uid:abc"));
/// assert!(!matches("dashboards:uid:abc", "dashboards:uid:other"));
/// ```
pub fn matches(granted: &str, required: &str) -> bool {
    if granted.is_empty() {
        return false;
    }

    if !validate_scope(granted) {
        warn!(scope = granted, reason = INVALID_SCOPE_REASON, "Invalid scope");
        return false;
    }

    if let Some(prefix) = granted.strip_suffix(WILDCARD) {
        if required.starts_with(prefix) {
            debug!(granted, required, "Matched scope by prefix");
            return true;
        }
    }

    granted == required
}
