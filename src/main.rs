use anyhow::Result;
use clap::Parser;
use prompt_ocr_server::app::{self, AppState};
use prompt_ocr_server::models::Config;
use std::net::{IpAddr, SocketAddr};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "prompt-ocr-server")]
#[command(about = "Serve chat-completion and screenshot OCR routes")]
struct CliArgs {
    /// Port to listen on. Overrides the PORT environment variable.
    #[arg(long, value_parser = parse_port_arg)]
    port: Option<u16>,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,
}

fn parse_port_arg(input: &str) -> std::result::Result<u16, String> {
    input
        .parse::<u16>()
        .map_err(|_| format!("Invalid port '{}'. Expected a number from 0 to 65535", input))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prompt_ocr_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let addr = SocketAddr::new(args.host, args.port.unwrap_or(config.port));
    info!("Starting prompt-ocr-server on {}", addr);

    if let Err(e) = app::serve(addr, state).await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
