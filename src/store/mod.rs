//! Contact storage backends
//!
//! Supports MongoDB and in-memory backends. Both keep the same semantics:
//! lookups, updates and deletes act on the first contact whose `email` matches,
//! and a key that matches nothing is a no-op for writes.

pub mod memory;
pub mod mongo;

pub use memory::MemContactStore;
pub use mongo::MongoContactStore;

use crate::common::Result;
use crate::contact::Contact;
use async_trait::async_trait;

/// What an update touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Trait for contact storage backends
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Add a new contact.
    async fn insert(&self, contact: &Contact) -> Result<()>;

    /// Every stored contact, fully materialized.
    async fn find_all(&self) -> Result<Vec<Contact>>;

    /// Overwrite the non-key fields of the contact keyed by `email`.
    async fn update_by_email(&self, email: &str, contact: &Contact) -> Result<UpdateOutcome>;

    /// Fails with `Error::NotFound` when nothing matches.
    async fn find_by_email(&self, email: &str) -> Result<Contact>;

    /// Returns how many contacts were removed (0 or 1).
    async fn delete_by_email(&self, email: &str) -> Result<u64>;
}
