use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use umbra_clock::SystemClock;
use umbra_gateway::{
    AppState, DataApi, FUNCTIONS_PREFIX, GatewayConfig, InMemoryDataApi, RestDataApi,
    create_router,
};

fn print_help() {
    eprintln!(
        r#"Umbra Gateway - privacy DeFi proxy functions

USAGE:
    umbra-gateway [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --in-memory         Keep tables in memory instead of calling the data API
    --help              Print this help message

ENVIRONMENT VARIABLES:
    HOST                Server host (default: 0.0.0.0)
    PORT                Server port (default: 8080)
    DATA_API_URL        Base URL of the data API
    DATA_API_KEY        Service key for the data API
    RUST_LOG            Log level filter

EXAMPLES:
    # Run against a data API
    DATA_API_URL=https://db.example.com DATA_API_KEY=... umbra-gateway

    # Run offline
    umbra-gateway --in-memory

    # Run with config file
    umbra-gateway --config gateway.json
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "umbra_gateway=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut in_memory = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--in-memory" => in_memory = true,
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            GatewayConfig::from_file(&path)?
        }
        None => {
            tracing::info!("Using default configuration");
            GatewayConfig::default()
        }
    }
    .with_env()?;

    if in_memory {
        tracing::info!("Data API: in-memory tables");
        serve(&config, InMemoryDataApi::new()).await
    } else {
        if config.data_api_url.is_none() || config.data_api_key.is_none() {
            tracing::warn!("DATA_API_URL or DATA_API_KEY unset; every function will fail");
        }
        let data_api = RestDataApi::new(config.data_api_url.clone(), config.data_api_key.clone());
        serve(&config, data_api).await
    }
}

async fn serve<D: DataApi + 'static>(
    config: &GatewayConfig,
    data_api: D,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(
        Arc::new(data_api),
        Arc::new(SystemClock),
        config.confirmation_delay(),
    );
    let router = create_router(Arc::new(state));

    let addr = config.addr();
    tracing::info!("Starting Umbra Gateway");
    tracing::info!("Functions: http://{}{}/", addr, FUNCTIONS_PREFIX);
    tracing::info!("Available endpoints:");
    tracing::info!("  POST /functions/v1/activate-agent");
    tracing::info!("  POST /functions/v1/create-deposit");
    tracing::info!("  POST /functions/v1/generate-stealth-address");
    tracing::info!("  GET  /functions/v1/get-pool-stats");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
