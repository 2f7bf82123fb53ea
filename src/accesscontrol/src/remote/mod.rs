//! Remote relationship-based authorization checks
//!
//! Requirements are checked against an external authorization service that
//! stores subject, relation, object tuples. Each check is translated from
//! an (action, scope) pair into a relation and an object, then sent through
//! a [`CheckTransport`].
//!
//! ```text
//! (action, scope, container) → RelationTranslator → (relation, object)
//!                                                          ↓
//!                     RemoteClient → CheckTransport → CheckResponse
//! ```

mod client;
mod translate;

pub use client::{CheckRequest, CheckResponse, CheckTransport, RemoteClient, RemoteError, TupleKey};
pub use translate::{ContainerKind, DefaultTranslator, RelationTranslator};
