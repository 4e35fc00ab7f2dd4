//! # FoodChef
//!
//! REST backend for the FoodChef food-ordering marketplace.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export MONGODB_URI=mongodb+srv://...
//! export FIREBASE_API_KEY=AIza...
//! export STRIPE_SECRET_KEY=sk_test_...
//!
//! # Run the server
//! foodchef
//! ```

use chef_api::{routes, state::AppState};
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

    // Print banner
    print_banner();

    // Initialize application state (connects and pings the document store)
    let state = AppState::new().await?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Database: {}", state.config.database);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🍳 FoodChef is cooking on port {}", addr.port());

    if !is_prod {
        info!("📋 Meals: GET http://{}/meals", addr);
        info!("🧾 Orders: POST http://{}/orders", addr);
        info!("💳 Intents: POST http://{}/create-payment-intent", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  🍳 FoodChef API 🍳
  ━━━━━━━━━━━━━━━━━━
  Marketplace backend
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
