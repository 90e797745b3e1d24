//! MongoDB collection backend
//!
//! Each call gets its own execution window of `timeout`; expiry abandons the
//! request and surfaces `Error::Timeout`. Nothing is retried.

use crate::common::{with_timeout, Error, Result};
use crate::contact::Contact;
use crate::store::{ContactStore, UpdateOutcome};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Collection;
use std::time::Duration;

#[derive(Clone)]
pub struct MongoContactStore {
    collection: Collection<Contact>,
    timeout: Duration,
}

impl MongoContactStore {
    pub fn new(collection: Collection<Contact>, timeout: Duration) -> Self {
        Self {
            collection,
            timeout,
        }
    }

    /// `database.collection`
    pub fn namespace(&self) -> String {
        self.collection.namespace().to_string()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl ContactStore for MongoContactStore {
    async fn insert(&self, contact: &Contact) -> Result<()> {
        tracing::debug!(email = %contact.email, ns = %self.namespace(), "insert");
        with_timeout("insert", self.timeout, async {
            self.collection.insert_one(contact).await
        })
        .await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Contact>> {
        tracing::debug!(ns = %self.namespace(), "find all");
        let contacts = with_timeout("find_all", self.timeout, async {
            let cursor = self.collection.find(doc! {}).await?;
            cursor.try_collect::<Vec<_>>().await
        })
        .await?;
        tracing::debug!(count = contacts.len(), "find all done");
        Ok(contacts)
    }

    async fn update_by_email(&self, email: &str, contact: &Contact) -> Result<UpdateOutcome> {
        tracing::debug!(email, "update");
        let filter = doc! { "email": email };
        let update = doc! { "$set": contact.mutable_fields() };
        let result = with_timeout("update", self.timeout, async {
            self.collection.update_one(filter, update).await
        })
        .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Contact> {
        tracing::debug!(email, "find by email");
        with_timeout("find_by_email", self.timeout, async {
            self.collection.find_one(doc! { "email": email }).await
        })
        .await?
        .ok_or_else(|| Error::NotFound(email.to_string()))
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64> {
        tracing::debug!(email, "delete");
        let result = with_timeout("delete", self.timeout, async {
            self.collection.delete_one(doc! { "email": email }).await
        })
        .await?;
        Ok(result.deleted_count)
    }
}
