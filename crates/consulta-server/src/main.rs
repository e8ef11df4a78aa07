//! # Consulta Rápida Server
//!
//! Read-through cached product catalog queries over PostgreSQL and Redis.

use consulta_config::ConfigLoader;
use consulta_core::{telemetry::init_telemetry, ConsultaResult};
use consulta_server::{
    app::{install_metrics, App},
    startup::print_banner,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("consulta-server: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> ConsultaResult<()> {
    let loader = ConfigLoader::from_default_location()?;
    let config = loader.get().clone();

    init_telemetry(&config.observability.telemetry(&config.app.name))?;
    print_banner();

    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {}", config.app.environment);

    let metrics = install_metrics(&config.observability)?;
    let app = App::build(config, metrics).await?;

    app.run().await
}
