//! # Slice Shop API
//!
//! ## Usage
//!
//! ```bash
//! # Optional configuration
//! export HOST=0.0.0.0
//! export PORT=8080
//! export CATALOG_PATH=config/catalog.toml
//!
//! # Run the server
//! slice-api
//! ```

use slice_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Menu loaded: {} bases, {} add-ons",
        state.shop.catalog().bases.len(),
        state.shop.catalog().add_ons.len()
    );
    info!("Payment channels: {:?}", state.shop.payments().channels());

    let app = routes::create_router(state);

    info!("Slice Shop starting on http://{}", addr);

    if !is_prod {
        info!("Menu: GET http://{}/api/v1/menu", addr);
        info!("Order: POST http://{}/api/v1/sessions", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Slice Shop
  ━━━━━━━━━━━━━━━━━━━━━━━
  Order counter API
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
