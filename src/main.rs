use std::path::Path;

use anyhow::Context;
use clap::Parser;
use factom_api::{
    cli::{Cli, Commands, NodeArgs},
    config::{get_default_config, load_configuration, write_config_to},
    http::{CallResult, FactomApiAdapter, FactomdClient, TransportOverrides},
    logging::init_logging,
};
use log::{debug, info};
use serde::Serialize;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::InitConfig { force } => init_config(&cli.config, force)?,
        Commands::Call {
            action,
            method,
            params,
            raw,
        } => {
            let params: serde_json::Value =
                serde_json::from_str(&params).context("--params must be valid JSON")?;
            let adapter = connect(&cli.config, &cli.node)?;
            let result = adapter
                .call(&action, &method, &params, TransportOverrides::default(), !raw)
                .await?;
            match result {
                CallResult::Object(value) => print_json(&value)?,
                CallResult::Raw(body) => println!("{}", body),
            }
        },
        Commands::Heights => print_json(&node_client(&cli.config, &cli.node)?.heights().await?)?,
        Commands::Properties => print_json(&node_client(&cli.config, &cli.node)?.properties().await?)?,
        Commands::DirectoryBlockHead => {
            print_json(&node_client(&cli.config, &cli.node)?.directory_block_head().await?)?
        },
        Commands::ChainHead { chain_id } => {
            print_json(&node_client(&cli.config, &cli.node)?.chain_head(&chain_id).await?)?
        },
        Commands::Entry { hash } => print_json(&node_client(&cli.config, &cli.node)?.entry(&hash).await?)?,
        Commands::Transaction { hash } => {
            print_json(&node_client(&cli.config, &cli.node)?.transaction(&hash).await?)?
        },
    }

    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<(), anyhow::Error> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists, pass --force to overwrite it", path.display());
    }
    write_config_to(path, get_default_config())?;
    info!(path:% = path.display(); "Wrote default configuration");
    Ok(())
}

/// Loads the config file, applies the command line overrides and builds the adapter.
fn connect(path: &Path, args: &NodeArgs) -> Result<FactomApiAdapter, anyhow::Error> {
    let mut node_config = load_configuration(path)?;
    node_config.apply_node(args);

    let adapter_config = node_config
        .to_adapter_config()
        .context("Invalid node configuration")?;
    Ok(FactomApiAdapter::with_config(adapter_config)?)
}

fn node_client(path: &Path, args: &NodeArgs) -> Result<FactomdClient, anyhow::Error> {
    let client = FactomdClient::new(connect(path, args)?);
    debug!(node:% = client.get_address(); "Querying Factom node");
    Ok(client)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
