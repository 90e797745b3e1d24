//! CLI for the contact book

use clap::Parser;
use minicontacts::common::{parse_duration, Backend};
use minicontacts::ops::{execute, execute_connected, Command};
use minicontacts::{Config, Connection, MemContactStore};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "minicontacts")]
#[command(about = "CRUD over a MongoDB contacts collection")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./minicontacts.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// MongoDB connection string
    #[arg(long)]
    uri: Option<String>,

    /// Database name
    #[arg(long)]
    database: Option<String>,

    /// Collection name
    #[arg(long)]
    collection: Option<String>,

    /// Per-operation timeout (e.g. 500ms, 5s)
    #[arg(long, value_parser = parse_timeout)]
    timeout: Option<Duration>,

    /// Storage backend
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    #[command(subcommand)]
    command: Option<Command>,
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    parse_duration(s).map_err(|e| e.to_string())
}

impl Cli {
    /// File and env first, then flags on top.
    fn resolve_config(&self) -> minicontacts::Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(uri) = &self.uri {
            config.uri.clone_from(uri);
        }
        if let Some(database) = &self.database {
            config.database.clone_from(database);
        }
        if let Some(collection) = &self.collection {
            config.collection.clone_from(collection);
        }
        if let Some(timeout) = self.timeout {
            config.set_timeout(timeout)?;
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = cli.command.unwrap_or(Command::Demo);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match config.backend {
        Backend::Memory => {
            let store = MemContactStore::new();
            execute(&store, command, &mut out).await
        }
        Backend::Mongo => {
            let conn = Connection::connect(&config).await?;
            execute_connected(conn, command, &mut out).await
        }
    };

    if let Err(e) = &result {
        tracing::error!("{}", e);
    }
    Ok(result?)
}
