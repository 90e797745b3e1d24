//! Operations: CLI commands and the demo walkthrough

pub mod command;
pub mod demo;

pub use command::{execute, execute_connected, Command};
pub use demo::{run_demo, sample_contact, DemoReport, SAMPLE_EMAIL};
