//! Management CLI for the record gateway's backends.
//!
//! Resolves service addresses exactly as the gateway does (defaults, optional
//! config file, env overrides) and issues raw JSON calls against the backend
//! record services, which is handy when the gateway's HTML surface is in the
//! way of debugging.

use clap::{Parser, Subcommand};
use serde_json::Value;

use record_gateway::config::loader;
use record_gateway::registry::ServiceRegistry;
use record_gateway::upstream::UpstreamClient;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Inspect the record services behind the gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered services and their resolved addresses
    Services,
    /// Fetch a service's whole collection
    List { service: String },
    /// Fetch a single item
    Show { service: String, id: i64 },
    /// Delete a single item
    Delete { service: String, id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = loader::from_env()?;
    let registry = ServiceRegistry::from_config(&config.services)?;
    let upstream = UpstreamClient::new(std::time::Duration::from_secs(
        config.timeouts.upstream_secs,
    ))?;

    match cli.command {
        Commands::Services => {
            for name in registry.service_names() {
                let (kind, base) = registry.resolve(name)?;
                println!("{kind}\t{base}");
            }
        }
        Commands::List { service } => {
            let (kind, base) = registry.resolve(&service)?;
            let items = upstream.list(base, kind).await?;
            print_json(&items)?;
        }
        Commands::Show { service, id } => {
            let (kind, base) = registry.resolve(&service)?;
            let item = upstream.get(base, kind, id).await?;
            print_json(&item)?;
        }
        Commands::Delete { service, id } => {
            let (kind, base) = registry.resolve(&service)?;
            upstream.delete(base, kind, id).await?;
            println!("deleted {kind}/{id}");
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
