use std::collections::HashMap;

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "users-cli")]
#[command(about = "Management CLI for the users-api service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8083")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health and version
    Status,
    /// Show the current configuration snapshot
    Show,
    /// Push configuration values as KEY=VALUE pairs (provider key
    /// spelling, e.g. JWT_SECRET=... SERVER_PORT=...)
    Push { pairs: Vec<String> },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
            let res = client.get(format!("{}/version", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Show => {
            let res = client
                .get(format!("{}/config/current", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Push { pairs } => {
            let mut config = HashMap::new();
            for pair in &pairs {
                match pair.split_once('=') {
                    Some((key, value)) => {
                        config.insert(key.to_string(), Value::String(value.to_string()));
                    }
                    None => {
                        eprintln!("Ignoring malformed pair (expected KEY=VALUE): {pair}");
                    }
                }
            }

            let res = client
                .post(format!("{}/config/update", cli.url))
                .json(&serde_json::json!({ "config": config }))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: service returned status {status}");
        eprintln!("{text}");
        return Ok(());
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{text}"),
    }
    Ok(())
}
