//! Engine binary for Skywatch.
//!
//! Wires together the snapshot scheduler, the observer API server and
//! the optional LED-matrix pusher. Loads configuration, initializes all
//! subsystems and runs the tick loop until the process is terminated.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `skywatch-config.yaml`
//! 3. Create the shared application state (empty store + broadcaster)
//! 4. Spawn the Observer API server on a background task
//! 5. Build the matrix client and probe its reachability
//! 6. Arm the scheduler and enter the tick loop

mod awtrix;
mod error;
mod report;
mod scheduler;

use std::path::Path;
use std::sync::Arc;

use skywatch_core::config::ConfigError;
use skywatch_core::SkywatchConfig;
use skywatch_observer::startup::spawn_observer;
use skywatch_observer::{AppState, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::awtrix::AwtrixClient;
use crate::error::EngineError;
use crate::scheduler::Scheduler;

/// Application entry point for the Skywatch engine.
///
/// # Errors
///
/// Returns an error if configuration loading, observer startup or
/// scheduler arming fails; the tick loop itself never returns.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("skywatch-engine starting");

    // 2. Load configuration.
    let config = load_config().map_err(EngineError::from)?;
    info!(
        latitude = config.site.latitude,
        update_interval_secs = config.schedule.update_interval_secs,
        port = config.server.port,
        matrix_enabled = config.matrix.enabled,
        "Configuration loaded"
    );

    // 3. Create shared state: empty store, no subscribers yet.
    let app_state = Arc::new(AppState::new());

    // 4. Start the Observer API server.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let _observer_handle = spawn_observer(server_config, Arc::clone(&app_state))
        .await
        .map_err(EngineError::from)?;
    info!(port = config.server.port, "Observer API server started");

    // 5. Build the matrix client, if enabled.
    let matrix = if config.matrix.enabled {
        match AwtrixClient::new(&config.matrix.base_url) {
            Ok(client) => {
                client.check_connectivity().await;
                Some(client)
            }
            Err(e) => {
                warn!(error = %e, "matrix client unavailable, pushes disabled");
                None
            }
        }
    } else {
        info!("Matrix pushes disabled by configuration");
        None
    };

    // 6. Arm the scheduler and run forever. A bad interval aborts
    //    startup here rather than running silently with no data.
    let engine_scheduler = Scheduler::from_config(&config).map_err(EngineError::from)?;
    info!("Scheduler armed, entering tick loop");
    engine_scheduler.run(app_state, matrix).await;

    Ok(())
}

/// Load the configuration from `skywatch-config.yaml`.
///
/// Looks for the config file relative to the current working directory
/// and falls back to defaults when it is absent.
fn load_config() -> Result<SkywatchConfig, ConfigError> {
    let config_path = Path::new("skywatch-config.yaml");
    if config_path.exists() {
        SkywatchConfig::from_file(config_path)
    } else {
        info!("Config file not found, using defaults");
        Ok(SkywatchConfig::default())
    }
}
