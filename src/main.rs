use dotenvy::dotenv;
use politcol_bot::config::{resolve_bot_token, Settings, TerminalPrompt};
use politcol_bot::logging::{init_logging, RedactionPatterns};
use politcol_bot::menu::{content, Router};
use politcol_bot::runner::run_bot;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenv().ok();

    // Initialize redaction patterns early (before logging)
    let patterns = Arc::new(RedactionPatterns::new().map_err(|e| {
        eprintln!("Failed to compile regex patterns: {e}");
        e
    })?);

    init_logging(patterns);

    info!("Starting Politcol menu bot...");

    let token = init_token();
    let router = init_router();

    if let Err(e) = run_bot(token, router).await {
        error!("Bot stopped: {e}");
        error!("{}", e.guidance());
        std::process::exit(1);
    }

    Ok(())
}

fn init_token() -> String {
    let settings = match Settings::new() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    match resolve_bot_token(&settings, &mut TerminalPrompt) {
        Ok(token) => {
            info!("Configuration loaded successfully.");
            token
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn init_router() -> Arc<Router> {
    match content::college_catalog() {
        Ok(catalog) => {
            info!("Menu catalog loaded ({} screens).", catalog.len());
            Arc::new(Router::new(catalog))
        }
        Err(e) => {
            error!("Invalid menu catalog: {}", e);
            std::process::exit(1);
        }
    }
}
