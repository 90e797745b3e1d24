//! The Contact record

use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A contact as stored in the collection.
///
/// `email` is the lookup key. Uniqueness is a convention, nothing enforces it.
/// The server-assigned `_id` is ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Fields an update may overwrite. The key is not among them.
    pub fn mutable_fields(&self) -> Document {
        doc! {
            "name": self.name.as_str(),
            "phone": self.phone.as_str(),
        }
    }

    /// Copy the non-key fields of `other` into `self`.
    pub(crate) fn apply(&mut self, other: &Contact) -> bool {
        let changed = self.name != other.name || self.phone != other.phone;
        self.name.clone_from(&other.name);
        self.phone.clone_from(&other.phone);
        changed
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {}", self.name, self.email, self.phone)
    }
}
