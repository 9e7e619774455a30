//! Terminal client entry point.
mod app;
mod config;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use app::CliApp;
use arena_core::{ClassTable, Session};
use config::CliConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    let catalog = config
        .load_catalog()
        .context("failed to load equipment definitions")?;
    tracing::info!(
        weapons = catalog.weapon_names().len(),
        armors = catalog.armor_names().len(),
        seed = ?config.arena.seed,
        "hero arena ready"
    );

    let session = Session::new(
        Arc::new(catalog),
        Arc::new(ClassTable::standard()),
        config.arena,
    );
    let stdin = io::stdin();
    CliApp::new(session, stdin.lock(), io::stdout()).run()
}
