//! Sitekit CLI — command-line client for the site API.
//!
//! Set SITEKIT_API_TOKEN (and optionally SITEKIT_API_URL and
//! SITEKIT_MODEL_ID). Uses bearer auth.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use sitekit_api_client::ApiClient;
use sitekit_cli::{init_tracing, parse_attributes};
use sitekit_core::Config;

#[derive(Parser)]
#[command(name = "sitekit", about = "Site API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List records of a model
    List {
        /// Model id (falls back to SITEKIT_MODEL_ID)
        #[arg(long)]
        model: Option<String>,
    },
    /// Create a record
    Create {
        /// Model id (falls back to SITEKIT_MODEL_ID)
        #[arg(long)]
        model: Option<String>,
        /// Record attributes as a JSON object, e.g. '{"title":"test"}'
        #[arg(long)]
        attributes: String,
    },
    /// Upload a file as an asset
    Upload {
        /// Path to the file to upload
        file: std::path::PathBuf,
        /// Name for the file on the CMS (defaults to the local file name)
        #[arg(long)]
        name: Option<String>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn resolve_model(flag: Option<String>, config: &Config) -> anyhow::Result<String> {
    flag.or_else(|| config.model_id.clone())
        .context("No model id. Pass --model or set SITEKIT_MODEL_ID")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config =
        Config::from_env().context("Failed to load configuration. Set SITEKIT_API_TOKEN")?;
    let client = ApiClient::from_config(&config)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::List { model } => {
            let model = resolve_model(model, &config)?;
            let response = client.list_records(&model).await?;
            print_json(&response)?;
        }
        Commands::Create { model, attributes } => {
            let model = resolve_model(model, &config)?;
            let attributes = parse_attributes(&attributes)?;
            let id = client.create_record(&model, attributes).await?;
            print_json(&serde_json::json!({ "id": id }))?;
        }
        Commands::Upload { file, name } => {
            let remote_name = match name {
                Some(name) => name,
                None => file
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_string)
                    .context("Cannot derive a remote name from the file path; pass --name")?,
            };
            let upload = client.upload_asset(&file, &remote_name).await?;
            print_json(&serde_json::json!({ "id": upload.id }))?;
        }
    }

    Ok(())
}
