// Framework bootstrap for the feed server runtime.

use crate::domain::{WorldStore, WorldView};
use crate::frameworks::config;
use crate::interface_adapters::routes::app;
use crate::interface_adapters::shutdown::ShutdownSignal;
use crate::interface_adapters::state::{AppState, StreamSettings};
use crate::interface_adapters::store::{WorldPublisher, world_channel};
use crate::use_cases::WorldReader;

use std::net::SocketAddr;
use std::path::Path;
use std::{io::Result, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn init_runtime() {
    // A missing .env is normal; a malformed one is worth hearing about.
    let env_problem = match dotenvy::dotenv() {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (json_layer, text_layer) = if config::json_logs() {
        let layer = fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(true);
        (Some(layer), None)
    } else {
        (None, Some(fmt::layer().compact().with_target(false)))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    if let Some(e) = env_problem {
        tracing::warn!(error = %e, ".env ignored");
    }

    std::panic::set_hook(Box::new(|info| {
        let thread = std::thread::current();
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(
            thread = thread.name().unwrap_or("unnamed"),
            %info,
            ?backtrace,
            "panic"
        );
    }));
}

async fn bind(address: SocketAddr) -> Result<TcpListener> {
    match TcpListener::bind(address).await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            tracing::error!(%address, error = %e, "cannot bind feed listener");
            Err(std::io::Error::new(e.kind(), format!("bind {address}: {e}")))
        }
    }
}

/// Serves the feed on `listener` until `shutdown` fires.
pub async fn run(
    listener: TcpListener,
    store: Arc<dyn WorldStore>,
    settings: StreamSettings,
    shutdown: ShutdownSignal,
) -> Result<()> {
    let address = listener.local_addr()?;
    tracing::debug!(
        push_tick_ms = settings.push_tick.as_millis(),
        send_timeout_ms = settings.send_timeout.as_millis(),
        loot_refresh_secs = settings.policy.loot_interval.as_secs(),
        containers_enabled = settings.policy.containers_enabled,
        process_loot = settings.policy.loose_loot_enabled,
        "stream settings"
    );

    let state = Arc::new(AppState {
        reader: WorldReader::new(store),
        stream: settings,
        shutdown: shutdown.clone(),
    });

    tracing::info!(%address, "listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(async move { shutdown.triggered().await })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "feed server stopped with error"))?;
    tracing::info!(%address, "feed server stopped");
    Ok(())
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let listener = bind(SocketAddr::new(config::http_host(), config::http_port())).await?;

    let (publisher, store) = world_channel(WorldView::idle());
    if let Some(path) = config::world_snapshot_path() {
        load_world_fixture(&publisher, &path).await;
    }

    let shutdown = ShutdownSignal::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("shutdown requested"),
            Err(e) => tracing::error!(error = %e, "failed to listen for ctrl-c"),
        }
        trigger.trigger();
    });

    let result = run(listener, Arc::new(store), config::stream_settings(), shutdown).await;
    // Keep the producer alive for the whole serve loop.
    drop(publisher);
    result
}

/// Publishes a `WorldView` read from a JSON file; failures keep the current view.
pub async fn load_world_fixture(publisher: &WorldPublisher, path: &Path) -> bool {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "world fixture unreadable");
            return false;
        }
    };

    match serde_json::from_slice::<WorldView>(&bytes) {
        Ok(view) => {
            tracing::info!(
                path = %path.display(),
                in_game = view.phase.in_game,
                players = view.players.len(),
                "world fixture published"
            );
            publisher.publish(view);
            true
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "world fixture invalid");
            false
        }
    }
}
