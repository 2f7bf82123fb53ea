//! Helpers for building scopes and template parameters

use super::matcher::WILDCARD;

/// Separator between scope segments
pub const SEPARATOR: char = ':';

/// Scopes are assumed to carry their kind and attribute in the first two
/// segments, e.g. `dashboards:uid:`
const MAX_PREFIX_PARTS: usize = 2;

/// Joins scope segments with `:`
///
/// # Examples
///
/// ```
/// use accesscontrol::scope::scope;
///
/// assert_eq!(scope(&["dashboards", "uid", "abc"]), "dashboards:uid:abc");
/// ```
pub fn scope(parts: &[&str]) -> String {
    parts.join(":")
}

/// Template placeholder for a URL parameter, resolved by the scope injector
pub fn parameter(name: &str) -> String {
    format!("{{{{ index .URLParams \"{}\" }}}}", name)
}

/// Template placeholder for a named field such as `OrgID`
pub fn field(name: &str) -> String {
    format!("{{{{ .{} }}}}", name)
}

/// Returns the prefix of a scope, keeping at most its kind and attribute
///
/// # Examples
///
/// ```
/// use accesscontrol::scope::scope_prefix;
///
/// assert_eq!(scope_prefix("dashboards:uid:abc"), "dashboards:uid:");
/// assert_eq!(scope_prefix("dashboards:abc"), "dashboards:");
/// assert_eq!(scope_prefix("dashboards"), "");
/// ```
pub fn scope_prefix(scope: &str) -> String {
    let parts: Vec<&str> = scope.split(SEPARATOR).collect();
    let keep = if parts.len() > MAX_PREFIX_PARTS {
        MAX_PREFIX_PARTS
    } else {
        parts.len() - 1
    };

    let mut prefix = parts[..keep].join(":");
    if keep > 0 {
        prefix.push(SEPARATOR);
    }
    prefix
}

/// Lists every wildcard scope that would cover the given prefix
///
/// # Examples
///
/// ```
/// use accesscontrol::scope::wildcards_from_prefix;
///
/// assert_eq!(
///     wildcards_from_prefix("dashboards:uid:"),
///     vec!["*", "dashboards:*", "dashboards:uid:*"],
/// );
/// ```
pub fn wildcards_from_prefix(prefix: &str) -> Vec<String> {
    let mut wildcards = vec![WILDCARD.to_string()];
    let mut current = String::new();

    for part in prefix.split(SEPARATOR).filter(|p| !p.is_empty()) {
        current.push_str(part);
        current.push(SEPARATOR);
        wildcards.push(format!("{}{}", current, WILDCARD));
    }

    wildcards
}
