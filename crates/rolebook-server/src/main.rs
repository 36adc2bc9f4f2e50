//! rolebook server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! database named by `DATABASE_URL`, ensures the schema exists, and serves the
//! JSON API over HTTP.
//!
//! ```sh
//! DATABASE_URL=sqlite://roles.db cargo run -p rolebook-server
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use rolebook_server::{Overrides, app, load_config};
use rolebook_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roles and user-role assignments over HTTP")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Database connection string, e.g. `sqlite://roles.db`.
  #[arg(long, env = "DATABASE_URL")]
  database_url: Option<String>,

  /// Interface to bind.
  #[arg(long)]
  host: Option<String>,

  /// Port to listen on.
  #[arg(short, long)]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = load_config(Some(cli.config), Overrides {
    host:         cli.host,
    port:         cli.port,
    database_url: cli.database_url,
  })
  .context("failed to load configuration")?;

  let store = SqliteStore::connect(&server_cfg.database_url)
    .await
    .with_context(|| format!("failed to open database {:?}", server_cfg.database_url))?;

  let address = server_cfg.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app(store)).await.context("server error")?;

  Ok(())
}
