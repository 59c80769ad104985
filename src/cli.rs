use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "factom-api")]
#[command(about = "JSON-RPC client for a Factom node (factomd)", long_about = None)]
pub struct Cli {
    #[arg(short, long, help = "Path to the configuration file", default_value = "factom.toml")]
    pub config: PathBuf,
    #[command(flatten)]
    pub node: NodeArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Connection flags that override the `[node]` table of the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct NodeArgs {
    #[arg(short = 'u', long, help = "The factomd JSON-RPC URL, e.g. http://localhost:8088/v2")]
    pub host: Option<String>,
    #[arg(long = "cert", help = "Path to the factomd TLS certificate (https hosts only)")]
    pub cert_path: Option<PathBuf>,
    #[arg(long, help = "Username for factomd basic auth")]
    pub username: Option<String>,
    #[arg(long, help = "Password for factomd basic auth")]
    pub password: Option<String>,
    #[arg(long, help = "Request timeout in seconds")]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Call any JSON-RPC method and print the response
    Call {
        #[arg(help = "The JSON-RPC method, e.g. chain-head")]
        action: String,
        #[arg(short, long, help = "HTTP method (GET or POST)", default_value = "POST")]
        method: String,
        #[arg(short, long, help = "Parameters as a JSON object", default_value = "{}")]
        params: String,
        #[arg(long, help = "Print the body exactly as received instead of pretty JSON")]
        raw: bool,
    },
    /// Show the current block heights of the node
    Heights,
    /// Show the factomd and API versions
    Properties,
    /// Show the most recent directory block key merkle root
    DirectoryBlockHead,
    /// Show the head of a chain
    ChainHead {
        #[arg(short, long, help = "The chain id in hex format")]
        chain_id: String,
    },
    /// Show an entry
    Entry {
        #[arg(long, help = "The entry hash in hex format")]
        hash: String,
    },
    /// Show a factoid transaction or entry
    Transaction {
        #[arg(long, help = "The transaction or entry hash in hex format")]
        hash: String,
    },
    /// Write the default configuration file
    InitConfig {
        #[arg(short, long, help = "Overwrite an existing file")]
        force: bool,
    },
}
