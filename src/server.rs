//! Server initialization and startup logic for CodeHint.

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use codehint_api::{AppState, InterfaceConfig, InterfaceServer};
use codehint_config::{codehint_dir, Config, ConfigValidator};
use codehint_core::{
    AssistanceService, Broker, CommandPresenter, FilePreferenceStore, LogPresenter, Presenter,
    ProviderRegistry,
};

use crate::register::{default_provider, log_providers, ConfigProviderFactory};

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.codehint/debug/ with daily rotation.
pub(crate) fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = codehint_dir().join("debug");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("codehint")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The writer stops flushing once the guard drops.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Run the broker daemon in foreground.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting CodeHint v{}", env!("CARGO_PKG_VERSION"));

    let validation = ConfigValidator::validate(&config)?;
    for warning in &validation.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        for err in &validation.errors {
            error!("Config {}: {}", err.path, err.message);
        }
        return Err(format!("{} configuration error(s)", validation.errors.len()).into());
    }

    let registry = Arc::new(ProviderRegistry::new(Arc::new(ConfigProviderFactory::new(
        config.clone(),
    ))));
    log_providers(&registry);

    let service = Arc::new(AssistanceService::with_default(
        registry,
        default_provider(&config),
    ));

    let preferences_path = config.broker.preferences_path();
    info!("Preferences: {}", preferences_path.display());
    let preferences = Arc::new(FilePreferenceStore::new(preferences_path));

    let presenter: Arc<dyn Presenter> = match &config.presentation.opener {
        Some(program) => Arc::new(CommandPresenter::new(program.clone())),
        None => Arc::new(LogPresenter),
    };

    let broker = Broker::new(
        service,
        preferences,
        presenter,
        config.presentation.base_url.clone(),
    );
    let handle = broker.spawn();

    let state = Arc::new(AppState::new(handle.clone()));
    let server = InterfaceServer::new(
        InterfaceConfig::new(config.server.host.clone(), config.server.port),
        state,
    );

    info!("Broker API at {}", config.server.base_url());
    let result = server.run_until(shutdown_signal()).await;

    handle.shutdown();
    info!("CodeHint stopped");
    result
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down..."),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
