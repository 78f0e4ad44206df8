//! Payables CLI
//!
//! Command-line interface for the Payables API.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use payables_client::PayablesClient;
use payables_types::{Amount, Card, CreateTransactionRequest, PaymentMethod, TransactionId};

#[derive(Parser)]
#[command(name = "payables")]
#[command(author, version, about = "Payables API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Payables API
    #[arg(
        long,
        env = "PAYABLES_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction operations
    Transaction {
        #[command(subcommand)]
        action: TransactionCommands,
    },
    /// Payable operations
    Payable {
        #[command(subcommand)]
        action: PayableCommands,
    },
    /// Check API health
    Health,
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    CreditCard,
    DebitCard,
    Boleto,
}

#[derive(Subcommand)]
enum TransactionCommands {
    /// Record a transaction
    Create {
        /// Value in the smallest currency unit
        #[arg(long)]
        value: i64,
        #[arg(long, value_enum)]
        method: MethodArg,
        #[arg(long)]
        description: Option<String>,
        /// Card number (card methods only)
        #[arg(long, required_if_eq_any([("method", "credit-card"), ("method", "debit-card")]))]
        card_number: Option<String>,
        #[arg(long, required_if_eq_any([("method", "credit-card"), ("method", "debit-card")]))]
        holder_name: Option<String>,
        /// Expiration as MM/YY
        #[arg(long, required_if_eq_any([("method", "credit-card"), ("method", "debit-card")]))]
        expiration: Option<String>,
        #[arg(long, required_if_eq_any([("method", "credit-card"), ("method", "debit-card")]))]
        cvv: Option<String>,
    },
    /// Get transaction details
    Get {
        /// Transaction ID (UUID)
        id: String,
    },
    /// List all transactions
    List,
}

#[derive(Subcommand)]
enum PayableCommands {
    /// List all payables
    List,
}

fn parse_transaction_id(s: &str) -> Result<TransactionId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid transaction ID: {}", s))
}

fn build_payment(
    method: MethodArg,
    number: Option<String>,
    holder_name: Option<String>,
    expiration: Option<String>,
    cvv: Option<String>,
) -> Result<PaymentMethod> {
    let card = || -> Result<Card> {
        match (number, holder_name, expiration, cvv) {
            (Some(number), Some(holder_name), Some(expiration), Some(cvv)) => Ok(Card {
                number,
                holder_name,
                expiration,
                cvv,
            }),
            _ => anyhow::bail!(
                "card methods need --card-number, --holder-name, --expiration and --cvv"
            ),
        }
    };

    Ok(match method {
        MethodArg::CreditCard => PaymentMethod::CreditCard { card: card()? },
        MethodArg::DebitCard => PaymentMethod::DebitCard { card: card()? },
        MethodArg::Boleto => PaymentMethod::Boleto,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = PayablesClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Transaction { action } => match action {
            TransactionCommands::Create {
                value,
                method,
                description,
                card_number,
                holder_name,
                expiration,
                cvv,
            } => {
                let req = CreateTransactionRequest {
                    value: Amount::new(value)?,
                    description,
                    payment: build_payment(method, card_number, holder_name, expiration, cvv)?,
                };
                req.validate()?;
                let tx = client.create_transaction(&req).await?;
                println!("{}", serde_json::to_string_pretty(&tx)?);
            }
            TransactionCommands::Get { id } => {
                let transaction_id = parse_transaction_id(&id)?;
                match client.get_transaction(transaction_id).await? {
                    Some(tx) => println!("{}", serde_json::to_string_pretty(&tx)?),
                    None => {
                        eprintln!("transaction {} not found", transaction_id);
                        std::process::exit(1);
                    }
                }
            }
            TransactionCommands::List => {
                let transactions = client.list_transactions().await?;
                println!("{}", serde_json::to_string_pretty(&transactions)?);
            }
        },

        Commands::Payable { action } => match action {
            PayableCommands::List => {
                let payables = client.list_payables().await?;
                println!("{}", serde_json::to_string_pretty(&payables)?);
            }
        },
    }

    Ok(())
}
