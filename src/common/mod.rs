//! Common utilities and types shared across minicontacts

pub mod config;
pub mod error;
pub mod utils;

pub use config::{Backend, Config};
pub use error::{Error, Result};
pub use utils::{parse_duration, with_timeout};
