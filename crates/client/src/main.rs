//! cloudfns-client CLI entry point.

use cloudfns_client::cli::{Cli, Commands, OutputFormat};
use cloudfns_client::client::items::{parse_item, parse_item_id};
use cloudfns_client::client::CloudfnsClient;
use cloudfns_client::output::{format_output, pretty};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = CloudfnsClient::new(&cli.base_url);

    match cli.command {
        Commands::Items(items_cmd) => {
            use cloudfns_client::cli::items::ItemsAction;
            match items_cmd.action {
                ItemsAction::Put { item } => {
                    let item = client.put_item(&parse_item(&item)?).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&item, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Stored:\n{}", pretty::format_item(&item))
                        }
                    }
                }
                ItemsAction::Get { id } => {
                    let item = client.get_item(&parse_item_id(&id)?).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&item, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_item(&item)),
                    }
                }
                ItemsAction::Delete { id } => {
                    client.delete_item(&parse_item_id(&id)?).await?;
                    if !cli.quiet {
                        println!("Deleted item {}", id);
                    }
                }
            }
        }
        Commands::Connectivity => {
            let result = client.connectivity().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&result, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_connectivity(&result)),
            }
        }
        Commands::Rls => {
            let report = client.rls_report().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&report, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_report(&report)),
            }
        }
        Commands::Livez => {
            client.livez().await?;
            if !cli.quiet {
                println!("OK");
            }
        }
    }

    Ok(())
}
