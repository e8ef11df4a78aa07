//! Server startup utilities.

use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
   ______                       ____
  / ____/___  ____  _______  __/ / /_____ _
 / /   / __ \/ __ \/ ___/ / / / / __/ __ `/
/ /___/ /_/ / / / (__  ) /_/ / / /_/ /_/ /
\____/\____/_/ /_/____/\__,_/_/\__/\__,_/
                                   Rápida
    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(addr: &str, metrics_path: Option<&str>) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    if let Some(path) = metrics_path {
        info!("Metrics:   http://{}{}", addr, path);
    }
    info!("{}", separator);
}
