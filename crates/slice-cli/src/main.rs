//! # Slice Shop Counter
//!
//! Console ordering menu over the slice-shop engine.
//!
//! ## Usage
//!
//! ```bash
//! # Optional: use a custom menu
//! export CATALOG_PATH=config/catalog.toml
//!
//! slice-cli
//! ```

mod menu;

use anyhow::Context;
use menu::Counter;
use slice_core::{load_catalog, Shop};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so the menu stays readable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let catalog_path = std::env::var("CATALOG_PATH").ok().filter(|p| !p.is_empty());
    let catalog = load_catalog(catalog_path.as_deref()).context("Failed to load catalog")?;
    let shop = Shop::new(catalog).context("Invalid catalog")?;
    info!("Counter open with {} stocked items", shop.inventory().len());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Counter::new(shop, stdin.lock(), stdout.lock()).run()
}
