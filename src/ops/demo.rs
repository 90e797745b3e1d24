//! The CRUD walkthrough: insert, list, update, look up, delete

use crate::common::Result;
use crate::contact::Contact;
use crate::store::{ContactStore, UpdateOutcome};
use std::io::Write;

/// Key used by every step of the walkthrough
pub const SAMPLE_EMAIL: &str = "johndoe@example.com";

pub fn sample_contact() -> Contact {
    Contact::new("John Doe", SAMPLE_EMAIL, "1234567890")
}

/// Run the fixed demonstration sequence against `store`, writing one status
/// line per step to `out`. The first failing step aborts the run.
pub async fn run_demo<S, W>(store: &S, out: &mut W) -> Result<DemoReport>
where
    S: ContactStore + ?Sized,
    W: Write,
{
    tracing::info!("Starting CRUD demo");

    store.insert(&sample_contact()).await?;
    writeln!(out, "Contact inserted successfully!")?;

    let contacts = store.find_all().await?;
    writeln!(out, "All contacts:")?;
    for contact in &contacts {
        writeln!(out, "{}", contact)?;
    }

    let updated = Contact {
        phone: "9876543210".to_string(),
        ..sample_contact()
    };
    let update = store.update_by_email(SAMPLE_EMAIL, &updated).await?;
    writeln!(out, "Contact updated successfully!")?;

    let found = store.find_by_email(SAMPLE_EMAIL).await?;
    writeln!(out, "Contact found by email: {}", found)?;

    let deleted = store.delete_by_email(SAMPLE_EMAIL).await?;
    writeln!(out, "Contact deleted successfully!")?;

    Ok(DemoReport {
        listed: contacts.len(),
        update,
        found,
        deleted,
    })
}

#[derive(Debug)]
pub struct DemoReport {
    pub listed: usize,
    pub update: UpdateOutcome,
    pub found: Contact,
    pub deleted: u64,
}
