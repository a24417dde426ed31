use std::sync::Arc;

use anyhow::{Context, Result};
use careerstack_engine::{
    CacheStore, CompanyDirectory, FetchOrchestrator, FetchSettings, OrchestratorSettings,
    PipelineCoordinator, PipelineSettings, ReqwestPageFetcher,
};
use careerstack_server::{
    build_router, initialize_logging, AppState, LogDestination, ServerConfig, TelegramNotifier,
};
use stack_logging::stack_info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    initialize_logging(LogDestination::Both);

    let config = ServerConfig::from_env().context("invalid server configuration")?;

    let cache = CacheStore::open(&config.cache_db)
        .await
        .with_context(|| format!("failed to open cache at {:?}", config.cache_db))?;
    let directory = Arc::new(CompanyDirectory::new(&config.companies_csv));

    let fetcher =
        Arc::new(ReqwestPageFetcher::new(FetchSettings::default()).context("http client")?);
    let orchestrator = FetchOrchestrator::new(fetcher, OrchestratorSettings::default());

    let coordinator = Arc::new(PipelineCoordinator::new(
        Arc::clone(&directory),
        orchestrator,
        cache,
        PipelineSettings {
            cache_ttl: config.cache_ttl,
            ..PipelineSettings::default()
        },
    ));

    let telegram = config
        .telegram
        .clone()
        .map(|settings| Arc::new(TelegramNotifier::new(settings)));

    let router = build_router(AppState {
        coordinator,
        directory,
        telegram,
    });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    stack_info!("listening on {addr}");

    axum::serve(listener, router)
        .await
        .context("server error")?;
    Ok(())
}
