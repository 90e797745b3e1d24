//! # minicontacts
//!
//! A contact book doing plain CRUD against MongoDB:
//! - One record type, `Contact { name, email, phone }`, keyed by email
//! - Every request bounded by its own timeout window
//! - Errors surface to the caller; only the binary decides to exit
//! - An in-memory backend with the same semantics for offline runs and tests
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────────────────┐
//! │ minicontacts │────▶│ ContactStore            │
//! │ (CLI / demo) │     │  - MongoContactStore    │──▶ mongod
//! └──────┬───────┘     │  - MemContactStore      │
//!        │             └─────────────────────────┘
//!        │ connect / ping / disconnect
//!        ▼
//! ┌──────────────┐
//! │ Connection   │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Full walkthrough against a local server
//! minicontacts demo
//!
//! # Same thing without a server
//! minicontacts --backend memory demo
//!
//! # Single operations
//! minicontacts add --name "John Doe" --email johndoe@example.com --phone 1234567890
//! minicontacts list
//! minicontacts update johndoe@example.com --phone 9876543210
//! minicontacts get johndoe@example.com
//! minicontacts delete johndoe@example.com
//! ```

pub mod common;
pub mod connection;
pub mod contact;
pub mod ops;
pub mod store;

// Re-export commonly used types
pub use common::{Config, Error, Result};
pub use connection::Connection;
pub use contact::Contact;
pub use store::{ContactStore, MemContactStore, MongoContactStore, UpdateOutcome};

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
