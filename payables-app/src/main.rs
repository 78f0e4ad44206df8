//! # Payables Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize logging and optional OTLP trace export
//! - Pick the repository adapters
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payables_hex::{TransactionService, inbound::HttpServer};
use payables_repo::{InMemoryPayableRepo, InMemoryTransactionRepo};
use payables_types::{PayableRepository, TransactionRepository};

use config::{Config, LogFormat, Storage};

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("payables-service"), provider))
}

async fn serve<T, P>(transactions: T, payables: P, port: u16) -> anyhow::Result<()>
where
    T: TransactionRepository,
    P: PayableRepository,
{
    let server = HttpServer::new(TransactionService::new(transactions, payables));
    server.run(&format!("0.0.0.0:{}", port)).await
}

#[cfg(any(feature = "postgres", feature = "sqlite"))]
async fn serve_database(url: &str, port: u16) -> anyhow::Result<()> {
    // Connects and creates the tables before serving.
    let repo = payables_repo::build_repo(url).await?;
    serve(repo.clone(), repo, port).await
}

#[cfg(not(any(feature = "postgres", feature = "sqlite")))]
async fn serve_database(_url: &str, _port: u16) -> anyhow::Result<()> {
    anyhow::bail!("DATABASE_URL is set but no SQL backend was compiled in")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let otel = config.otlp_endpoint.as_deref().map(init_tracer).transpose()?;
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    let (json, pretty) = match config.log_format {
        LogFormat::Json => (Some(tracing_subscriber::fmt::layer().json()), None),
        LogFormat::Pretty => (None, Some(tracing_subscriber::fmt::layer().pretty())),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,payables_app=debug,payables_hex=debug".into()),
        )
        .with(json)
        .with(pretty)
        .with(telemetry)
        .init();

    tracing::info!("Starting payables server on port {}", config.port);

    let result = match &config.storage {
        Storage::Memory => {
            tracing::info!("Using in-memory storage");
            serve(
                InMemoryTransactionRepo::new(),
                InMemoryPayableRepo::new(),
                config.port,
            )
            .await
        }
        Storage::Database(url) => {
            tracing::info!("Using database storage");
            serve_database(url, config.port).await
        }
    };

    // Flush buffered spans before exit
    if let Some((_, provider)) = otel {
        if let Err(err) = provider.shutdown() {
            tracing::warn!(error = %err, "failed to flush OTLP spans on shutdown");
        }
    }

    result
}
