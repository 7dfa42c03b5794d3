//! Payments CLI
//!
//! Command-line interface for the payment records API.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use payments_client::PaymentsClient;
use payments_model::CreatePaymentRequest;

#[derive(Parser)]
#[command(name = "payments")]
#[command(author, version, about = "Payment records API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the payment records API
    #[arg(
        long,
        env = "PAYMENTS_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Create a payment from a JSON request file
    Create {
        /// Path to a CreatePaymentRequest JSON document
        #[arg(long)]
        file: PathBuf,
    },
    /// List all payments
    List,
    /// Get payment details
    Get {
        /// Payment ID (24 hex characters)
        id: String,
    },
    /// Replace a payment from a JSON request file
    Update {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete a payment
    Delete { id: String },
}

fn read_request(path: &Path) -> Result<CreatePaymentRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid payment request", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = PaymentsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => match client.health().await {
            Ok(health) => println!("✓ {}", health.message),
            Err(e) => {
                println!("✗ API is not healthy: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Payment { action } => match action {
            PaymentCommands::Create { file } => {
                let req = read_request(&file)?;
                let created = client.create_payment(&req).await?;
                println!("{}", serde_json::to_string_pretty(&created)?);
            }
            PaymentCommands::List => {
                let payments = client.list_payments().await?;
                println!("{}", serde_json::to_string_pretty(&payments)?);
            }
            PaymentCommands::Get { id } => match client.get_payment(&id).await? {
                Some(payment) => println!("{}", serde_json::to_string_pretty(&payment)?),
                None => {
                    println!("✗ Payment {} not found", id);
                    std::process::exit(1);
                }
            },
            PaymentCommands::Update { id, file } => {
                let req = read_request(&file)?;
                client.update_payment(&id, &req).await?;
                println!("✓ Payment {} updated", id);
            }
            PaymentCommands::Delete { id } => {
                client.delete_payment(&id).await?;
                println!("✓ Payment {} deleted", id);
            }
        },
    }

    Ok(())
}
