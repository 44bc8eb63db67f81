// ABOUTME: VitalForge server binary wiring storage, sync, analysis, and HTTP together
// ABOUTME: Starts the background sync scheduler and serves the REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use vitalforge::config::environment::ServerConfig;
use vitalforge::database::Database;
use vitalforge::errors::AppResult;
use vitalforge::intelligence::advisor::RecommendationService;
use vitalforge::intelligence::narrative::NarrativeGenerator;
use vitalforge::intelligence::RecommendationCache;
use vitalforge::llm::{AnthropicProvider, LlmProvider};
use vitalforge::logging;
use vitalforge::routes::{router, AppState};
use vitalforge::sync::SyncEngine;
use vitalforge_providers::{GarminClient, GarminConfig, WearableClient};

/// VitalForge - personal health analytics from Garmin wearable data
#[derive(Debug, Parser)]
#[command(name = "vitalforge-server", version, about)]
struct Args {
    /// HTTP port to bind, overrides HTTP_PORT
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database URL, overrides DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    logging::init_from_env()?;

    let args = Args::parse();
    let mut config = ServerConfig::from_env();
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    info!("initializing database");
    let database = Arc::new(Database::new(&config.database_url).await?);

    let garmin: Arc<dyn WearableClient> = Arc::new(GarminClient::new(GarminConfig {
        api_base_url: "https://connectapi.garmin.com".to_owned(),
        token_dir: config.garmin.token_dir.clone(),
        email: config.garmin.email.clone(),
        password: config.garmin.password.clone(),
    }));

    info!("authenticating with Garmin Connect");
    if let Err(e) = garmin.authenticate().await {
        warn!("Garmin authentication failed (will retry on first sync): {e}");
    }

    let sync = Arc::new(SyncEngine::new(database.clone(), garmin.clone()));
    {
        let sync = sync.clone();
        let settings = config.sync;
        tokio::spawn(async move {
            sync.run_scheduled(
                settings.interval_hours,
                settings.backfill_days,
                settings.refresh_days,
            )
            .await;
        });
    }

    let provider = AnthropicProvider::from_settings(&config.llm)
        .map(|p| Arc::new(p) as Arc<dyn LlmProvider>);
    if provider.is_none() {
        info!("no LLM endpoint configured, recommendations use rules-derived fallback");
    }
    let recommendations = Arc::new(RecommendationService::new(
        database.clone(),
        NarrativeGenerator::new(provider),
        Arc::new(RecommendationCache::new()),
    ));

    let state = AppState {
        database,
        recommendations,
        sync,
        wearable: garmin,
    };

    let addr = format!("0.0.0.0:{}", config.http_port);
    info!(addr, "starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| vitalforge::errors::AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| vitalforge::errors::AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
