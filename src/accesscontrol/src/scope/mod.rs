//! Scope matching and construction
//!
//! Scopes are `:`-separated identifiers such as `dashboards:uid:abc`. A
//! granted scope may end with a single `*`, in which case it covers every
//! required scope starting with the text before the wildcard.
//!
//! # Examples
//!
//! ```
//! use accesscontrol::scope::{matches, scope};
//!
//! let required = scope(&["dashboards", "uid", "abc"]);
//! assert!(matches("dashboards:*", &required));
//! assert!(!matches("folders:*", &required));
//! ```

mod builder;
mod matcher;


pub use builder::{field, parameter, scope, scope_prefix, wildcards_from_prefix, SEPARATOR};
pub use matcher::{matches, validate_scope, WILDCARD};
