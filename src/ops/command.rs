//! Single-operation commands and their status lines

use crate::common::{Error, Result};
use crate::connection::Connection;
use crate::contact::Contact;
use crate::ops::run_demo;
use crate::store::ContactStore;
use clap::Subcommand;
use std::io::Write;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert, list, update, look up and delete a sample contact
    Demo,

    /// Check that the server answers
    Ping,

    /// Add a contact
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,
    },

    /// List every contact
    List,

    /// Look up a contact by email
    Get {
        /// Email
        email: String,
    },

    /// Replace the name and/or phone of a contact
    Update {
        /// Email
        email: String,

        /// New name (kept if omitted)
        #[arg(long)]
        name: Option<String>,

        /// New phone (kept if omitted)
        #[arg(long)]
        phone: Option<String>,
    },

    /// Delete a contact by email
    Delete {
        /// Email
        email: String,
    },
}

/// Run one command against `store`, writing its status lines to `out`.
///
/// A key that matches nothing is reported on `out` and is not an error for
/// `get`, `update` and `delete`.
pub async fn execute<S, W>(store: &S, command: Command, out: &mut W) -> Result<()>
where
    S: ContactStore + ?Sized,
    W: Write,
{
    match command {
        Command::Demo => {
            let report = run_demo(store, out).await?;
            tracing::info!(
                listed = report.listed,
                matched = report.update.matched,
                deleted = report.deleted,
                "demo finished"
            );
        }

        // Ping already happened when the connection was opened.
        Command::Ping => {
            writeln!(out, "pong")?;
        }

        Command::Add { name, email, phone } => {
            store.insert(&Contact::new(name, email, phone)).await?;
            writeln!(out, "Contact inserted successfully!")?;
        }

        Command::List => {
            let contacts = store.find_all().await?;
            writeln!(out, "All contacts:")?;
            for contact in &contacts {
                writeln!(out, "{}", contact)?;
            }
        }

        Command::Get { email } => match store.find_by_email(&email).await {
            Ok(contact) => writeln!(out, "Contact found by email: {}", contact)?,
            Err(e) if e.is_not_found() => writeln!(out, "No contact found for {}", email)?,
            Err(e) => return Err(e),
        },

        Command::Update { email, name, phone } => {
            let contact = match (name, phone) {
                (Some(name), Some(phone)) => Contact::new(name, email.as_str(), phone),
                (name, phone) => {
                    // Omitted fields keep their stored values.
                    let mut stored = match store.find_by_email(&email).await {
                        Ok(stored) => stored,
                        Err(e) if e.is_not_found() => {
                            writeln!(out, "No contact found for {}", email)?;
                            return Ok(());
                        }
                        Err(e) => return Err(e),
                    };
                    if let Some(name) = name {
                        stored.name = name;
                    }
                    if let Some(phone) = phone {
                        stored.phone = phone;
                    }
                    stored
                }
            };
            let outcome = store.update_by_email(&email, &contact).await?;
            if outcome.matched == 0 {
                writeln!(out, "No contact found for {}", email)?;
            } else {
                writeln!(out, "Contact updated successfully!")?;
            }
        }

        Command::Delete { email } => {
            let deleted = store.delete_by_email(&email).await?;
            if deleted == 0 {
                writeln!(out, "No contact found for {}", email)?;
            } else {
                writeln!(out, "Contact deleted successfully!")?;
            }
        }
    }

    Ok(())
}

/// Ping, run `command` against the connection's collection, then disconnect.
///
/// The connection is released on every path, including a failed ping. The
/// first failure is returned; a failed disconnect only surfaces when the
/// command itself succeeded.
pub async fn execute_connected<W: Write>(
    conn: Connection,
    command: Command,
    out: &mut W,
) -> Result<()> {
    let result = ping_and_execute(&conn, command, out).await;

    let closed = conn.disconnect().await;
    let noted = match &closed {
        Ok(()) => writeln!(out, "Disconnected from MongoDB!").map_err(Error::from),
        Err(e) => {
            tracing::error!("Failed to disconnect: {}", e);
            Ok(())
        }
    };
    result.and(closed).and(noted)
}

async fn ping_and_execute<W: Write>(
    conn: &Connection,
    command: Command,
    out: &mut W,
) -> Result<()> {
    if let Err(e) = conn.ping().await {
        tracing::error!("Failed to ping the MongoDB server: {}", e);
        return Err(e);
    }
    writeln!(out, "Connected to MongoDB!")?;
    execute(&conn.contacts(), command, out).await
}
