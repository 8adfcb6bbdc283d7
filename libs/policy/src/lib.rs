//! Perimeter policy: who may invoke the gateway, decided before any request
//! content is looked at.

pub mod allowlist;
pub mod document;

pub use allowlist::{BadAllowlistEntry, IpAllowlist};
pub use document::{Effect, PolicyDocument, PolicyStatement, SourcePredicate};
