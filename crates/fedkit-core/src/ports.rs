//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the provider engine and
//! external adapters.

use crate::Result;

/// Durable key/value configuration store, namespaced by command path
/// and section.
///
/// Implementations either record the entry or fail with a storage-class
/// error; the provider engine propagates failures unchanged and never
/// retries. Write order is significant: the underlying store may be
/// order-sensitive, and downstream tooling expects the keys of one
/// bootstrap run to appear together under one section.
pub trait ConfigStore {
    /// Record `key = value` under the given command path and section.
    fn put(&mut self, cmd_names: &[String], section: &str, key: &str, value: &str) -> Result<()>;
}
