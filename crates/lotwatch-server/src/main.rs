mod api;
mod middleware;

use std::sync::Arc;

use lotwatch_core::Environment;
use lotwatch_datamall::DatamallClient;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = lotwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let account_key = match (&config.account_key, &config.env) {
        (Some(key), _) => key.clone(),
        (None, Environment::Development) => {
            tracing::warn!("ACCOUNT_KEY not set; DataMall will reject proxied requests");
            String::new()
        }
        (None, env) => anyhow::bail!("ACCOUNT_KEY is required in {env}"),
    };

    let datamall = DatamallClient::with_feed_url(
        &account_key,
        config.feed_timeout_secs,
        &config.user_agent,
        &config.feed_url,
    )?;
    let app = build_app(
        AppState {
            datamall: Arc::new(datamall),
        },
        &config.static_dir,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        env = %config.env,
        static_dir = %config.static_dir.display(),
        "lotwatch server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
