//! Connection manager
//!
//! Owns the driver client for the lifetime of a run: connect once, ping to
//! prove the server is there, hand out the contacts collection, shut down.

use crate::common::{with_timeout, Config, Error, Result};
use crate::contact::Contact;
use crate::store::MongoContactStore;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;
use std::time::Duration;

/// Share of the operation window the driver may spend finding a server.
///
/// Must stay strictly below the window: otherwise the window and the driver's
/// selection deadline race and an unreachable server surfaces as `Timeout`.
pub(crate) fn selection_timeout(window: Duration) -> Duration {
    window.mul_f64(0.8)
}

pub struct Connection {
    client: Client,
    database: String,
    collection: String,
    timeout: Duration,
}

impl Connection {
    /// Build a client for `config.uri`.
    ///
    /// The driver connects lazily, so an unreachable server only shows up on
    /// the first request. Server selection gives up before the operation
    /// window closes, so that request fails with `Error::Connection` within
    /// the window instead of waiting out the driver's 30s.
    pub async fn connect(config: &Config) -> Result<Self> {
        let timeout = config.timeout();

        let mut options = with_timeout("parse_uri", timeout, async {
            ClientOptions::parse(config.uri.as_str()).await
        })
        .await
        .map_err(|e| match e {
            Error::Timeout(_) => e,
            other => Error::InvalidConfig(format!("bad uri {}: {}", config.uri, other)),
        })?;

        options.app_name = Some(format!("minicontacts/{}", crate::VERSION));
        options.server_selection_timeout = Some(selection_timeout(timeout));
        options.connect_timeout = Some(selection_timeout(timeout));

        let client =
            Client::with_options(options).map_err(|e| Error::Connection(e.to_string()))?;

        tracing::info!(
            uri = %config.uri,
            database = %config.database,
            collection = %config.collection,
            "client ready"
        );

        Ok(Self {
            client,
            database: config.database.clone(),
            collection: config.collection.clone(),
            timeout,
        })
    }

    /// Round-trip a `ping` to the server.
    ///
    /// Refusal, server selection failure and expiry of the window are all
    /// reported as `Error::Connection`.
    pub async fn ping(&self) -> Result<()> {
        let admin = self.client.database("admin");
        with_timeout("ping", self.timeout, async {
            admin.run_command(doc! { "ping": 1 }).await
        })
        .await
        .map_err(|e| match e {
            Error::Connection(_) => e,
            other => Error::Connection(other.to_string()),
        })?;
        tracing::info!("server answered ping");
        Ok(())
    }

    /// The configured collection as a contact store.
    pub fn contacts(&self) -> MongoContactStore {
        let collection = self
            .client
            .database(&self.database)
            .collection::<Contact>(&self.collection);
        MongoContactStore::new(collection, self.timeout)
    }

    /// Close every pooled connection and stop background monitoring.
    pub async fn disconnect(self) -> Result<()> {
        let client = self.client;
        with_timeout("disconnect", self.timeout, async move {
            client.shutdown().await;
            Ok::<_, Error>(())
        })
        .await?;
        tracing::info!("client shut down");
        Ok(())
    }
}
