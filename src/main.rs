use tracing::info;

use shop_api::app_system::{setup_tracing, Config, ShopSystem};
use shop_api::http::{build_router, serve};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting E-Commerce API");

    let config = Config::load()?;
    let address = config.address();

    // Create the entire shop system (store and clients)
    let system = ShopSystem::start(&config).await?;
    let router = build_router(system.state(config));

    serve(router, &address).await?;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application stopped");
    Ok(())
}
