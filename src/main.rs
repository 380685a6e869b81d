//! Product Catalog Importer
//!
//! Pushes a local JSON product catalog to a Shopify store, creating or
//! updating products matched by SKU

// productimporter/src/main.rs
mod config;
mod errors;
mod import;
mod platform;
mod source;
mod utils;

use anyhow::{Context, Result};
use config::AppConfig;
use errors::ImportError;
use std::env;
use std::process::ExitCode;
use tracing::info;

const DEFAULT_LOG_FILTER: &str = "productimporter=info";

/// Main entry point for the importer
#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine: the variables may already be exported.
    let _ = dotenv::dotenv();

    if let Err(e) = utils::init_tracing(DEFAULT_LOG_FILTER) {
        eprintln!("⚠️ {}", e);
    }

    let outcome = tokio::select! {
        result = run_app() => result,
        _ = tokio::signal::ctrl_c() => {
            Err(ImportError::Cancelled("interrupted by Ctrl-C".to_string()).into())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_app() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let choice = if args.len() > 1 {
        args[1].trim().to_string()
    } else {
        prompt_choice()?
    };

    match choice.as_str() {
        "1" | "import" => {
            let app_config = AppConfig::load_from_env()
                .context("Failed to load importer configuration from the environment")?;
            info!("🚀 Starting product import...");
            let summary = import::run_import_flow(&app_config)
                .await
                .context("Import process failed")?;

            println!("{}", summary);
            if summary.has_failures() {
                anyhow::bail!("{} catalog record(s) failed to import", summary.failed());
            }
        }
        "2" | "list" => {
            let app_config = AppConfig::load_from_env()
                .context("Failed to load importer configuration from the environment")?;
            platform::run_listing_flow(&app_config)
                .await
                .context("Listing process failed")?;
        }
        _ => {
            println!("❌ Invalid choice. Please enter '1' (import) or '2' (list).");
            anyhow::bail!("Invalid operation choice");
        }
    }
    Ok(())
}

/// Prompts the user to select an operation
///
/// Returns the user's choice as String
fn prompt_choice() -> Result<String> {
    use std::io::{Write, stdin, stdout};

    println!("Select an operation:");
    println!("1. Import catalog into the store (or type 'import')");
    println!("2. Print the store's product listing (or type 'list')");
    print!("Enter your choice: ");
    stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    stdin().read_line(&mut input).context("Failed to read user input")?;
    Ok(input.trim().to_string())
}
