//! Mindspace server entry point.
//!
//! Loads configuration, connects to Postgres, wires adapters into the
//! router and serves until Ctrl+C or SIGTERM.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mindspace::adapters::ai::{
    FailoverAIProvider, GeminiConfig, GeminiProvider, GroqConfig, GroqProvider,
    UnconfiguredProvider,
};
use mindspace::adapters::auth::{OidcConfig, OidcSessionValidator};
use mindspace::adapters::http::{app_router, AppPorts, HttpOptions};
use mindspace::adapters::postgres::{
    PostgresAssessmentRepository, PostgresChatRepository, PostgresForumRepository,
    PostgresJournalRepository, PostgresUserRepository,
};
use mindspace::adapters::storage::LocalFileStorage;
use mindspace::config::{AiConfig, AppConfig, ServerConfig};
use mindspace::ports::{AIError, AIProvider};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    info!(environment = ?config.server.environment, "Connecting to database...");
    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("Running migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    tokio::fs::create_dir_all(&config.storage.upload_dir).await?;

    let ports = AppPorts {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        assessments: Arc::new(PostgresAssessmentRepository::new(pool.clone())),
        chat: Arc::new(PostgresChatRepository::new(pool.clone())),
        journal: Arc::new(PostgresJournalRepository::new(pool.clone())),
        forum: Arc::new(PostgresForumRepository::new(pool)),
        ai: build_ai_provider(&config.ai)?,
        storage: Arc::new(LocalFileStorage::new(
            &config.storage.upload_dir,
            config.storage.public_path.clone(),
        )),
        sessions: Arc::new(OidcSessionValidator::new(
            OidcConfig::new(&config.auth.issuer_url, &config.auth.audience)
                .with_cache_duration(config.auth.jwks_cache_ttl()),
        )?),
    };

    let options = HttpOptions {
        max_upload_bytes: config.storage.max_upload_bytes,
        request_timeout: config.server.request_timeout(),
        ai_budget: config.ai_budget(),
        cors_origins: config.server.cors_origins_list(),
        upload_dir: Some(config.storage.upload_dir.clone()),
        public_path: config.storage.public_path.clone(),
    };
    let app = app_router(&ports, &options);

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// JSON lines in production, human-readable output elsewhere.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .init();
    }
}

/// Groq first with Gemini behind it, whichever of the two has a key, or a
/// provider that always fails so callers use their canned fallbacks.
fn build_ai_provider(config: &AiConfig) -> Result<Arc<dyn AIProvider>, AIError> {
    let groq = config
        .groq_key()
        .map(|key| {
            GroqProvider::new(
                GroqConfig::new(key)
                    .with_model(&config.groq_model)
                    .with_timeout(config.timeout())
                    .with_max_retries(config.max_retries),
            )
        })
        .transpose()?;
    let gemini = config
        .gemini_key()
        .map(|key| {
            GeminiProvider::new(
                GeminiConfig::new(key)
                    .with_model(&config.gemini_model)
                    .with_timeout(config.timeout())
                    .with_max_retries(config.max_retries),
            )
        })
        .transpose()?;

    let provider: Arc<dyn AIProvider> = match (groq, gemini) {
        (Some(groq), Some(gemini)) => {
            info!("AI: groq with gemini fallback");
            Arc::new(FailoverAIProvider::new(groq).with_fallback(gemini))
        }
        (Some(groq), None) => {
            info!("AI: groq only");
            Arc::new(groq)
        }
        (None, Some(gemini)) => {
            info!("AI: gemini only");
            Arc::new(gemini)
        }
        (None, None) => {
            tracing::warn!("No AI provider key configured; using fallback content");
            Arc::new(UnconfiguredProvider)
        }
    };
    Ok(provider)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
