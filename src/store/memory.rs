//! In-memory contact store
//!
//! Keeps insertion order so `find_all` is stable. Duplicate emails are kept,
//! as a collection without a unique index would.

use crate::common::{Error, Result};
use crate::contact::Contact;
use crate::store::{ContactStore, UpdateOutcome};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

pub struct MemContactStore {
    contacts: Mutex<Vec<Contact>>,
}

impl MemContactStore {
    pub fn new() -> Self {
        Self {
            contacts: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave a half-written contact.
    fn lock(&self) -> MutexGuard<'_, Vec<Contact>> {
        self.contacts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemContactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for MemContactStore {
    async fn insert(&self, contact: &Contact) -> Result<()> {
        tracing::debug!(email = %contact.email, "insert (memory)");
        self.lock().push(contact.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Contact>> {
        Ok(self.lock().clone())
    }

    async fn update_by_email(&self, email: &str, contact: &Contact) -> Result<UpdateOutcome> {
        tracing::debug!(email, "update (memory)");
        let mut contacts = self.lock();
        let Some(stored) = contacts.iter_mut().find(|c| c.email == email) else {
            return Ok(UpdateOutcome::default());
        };
        let modified = stored.apply(contact);
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Contact> {
        self.lock()
            .iter()
            .find(|c| c.email == email)
            .cloned()
            .ok_or_else(|| Error::NotFound(email.to_string()))
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64> {
        tracing::debug!(email, "delete (memory)");
        let mut contacts = self.lock();
        match contacts.iter().position(|c| c.email == email) {
            Some(idx) => {
                contacts.remove(idx);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
