// File: console/src/main.rs
use anyhow::Result;
use console::config::ConfigManager;
use console::web::{start_web_server, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with reduced verbosity
    let env_filter = EnvFilter::from_default_env()
        .add_directive("console=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting hypervisor console backend");

    let config_manager = ConfigManager::new("config".to_string()).await?;
    let config = config_manager.get_current_config();
    info!(
        "Configuration loaded: daemon {}, default project {}",
        config.api_url, config.default_project
    );

    let state = AppState::from_config(config.clone())?;
    info!("Correlation service, daemon client and action services initialized");

    // Registrations are never expired; report how many are outstanding
    let event_queue = state.correlation.event_queue.clone();
    let report_interval = config.in_flight_report_interval_seconds;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(report_interval));
        loop {
            interval.tick().await;
            let in_flight = event_queue.len().await;
            if in_flight > 0 {
                warn!("{} operations still awaiting a terminal event", in_flight);
            }
        }
    });

    start_web_server(state).await?;

    Ok(())
}
