use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::debug;

use cidaas_core::{ConfiguredProvider, ResourceData};
use cidaas_provider::provider;
use cidaas_sdk::CidaasClient;

mod bag;

#[derive(Parser)]
#[command(name = "cidaas")]
#[command(about = "Drive cidaas provider lifecycle callbacks from the command line", long_about = None)]
struct Cli {
    /// JSON file holding the provider configuration block
    #[arg(long, global = true, default_value = "provider.json")]
    provider_config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print resource and data source schemas as JSON
    Schema {
        /// Only print this resource or data source
        kind: Option<String>,
    },
    /// Create a resource from desired attributes
    Create {
        kind: String,
        /// JSON file with the desired attributes
        #[arg(long)]
        attributes: PathBuf,
    },
    /// Refresh a resource from the remote side
    Read {
        kind: String,
        #[arg(long)]
        id: String,
        /// JSON file with the stored attributes
        #[arg(long)]
        attributes: Option<PathBuf>,
    },
    /// Update a resource in place
    Update {
        kind: String,
        #[arg(long)]
        id: String,
        /// JSON file with the desired attributes
        #[arg(long)]
        attributes: PathBuf,
        /// JSON file with the attributes recorded before the change
        #[arg(long)]
        prior: PathBuf,
    },
    /// Delete a resource
    Destroy {
        kind: String,
        #[arg(long)]
        id: String,
        /// JSON file with the stored attributes
        #[arg(long)]
        attributes: Option<PathBuf>,
    },
    /// Import an existing remote entity
    Import { kind: String, id: String },
    /// Read a data source
    Data {
        name: String,
        /// JSON file with the lookup arguments
        #[arg(long)]
        attributes: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Schema { kind } => run_schema(kind.as_deref()),
        Commands::Create { kind, attributes } => {
            let provider = connect(&cli.provider_config).await?;
            let mut data = bag::load(&attributes)?;
            let diags = provider.create(&kind, &mut data).await;
            finish(&data, &diags)
        }
        Commands::Read {
            kind,
            id,
            attributes,
        } => {
            let provider = connect(&cli.provider_config).await?;
            let mut data = stored(attributes.as_deref(), &id)?;
            let diags = provider.read(&kind, &mut data).await;
            finish(&data, &diags)
        }
        Commands::Update {
            kind,
            id,
            attributes,
            prior,
        } => {
            let provider = connect(&cli.provider_config).await?;
            let prior = bag::load(&prior)?.into_attributes();
            let mut data = bag::load(&attributes)?.with_id(id).with_prior(prior);
            let diags = provider.update(&kind, &mut data).await;
            finish(&data, &diags)
        }
        Commands::Destroy {
            kind,
            id,
            attributes,
        } => {
            let provider = connect(&cli.provider_config).await?;
            let mut data = stored(attributes.as_deref(), &id)?;
            let diags = provider.delete(&kind, &mut data).await;
            if bag::report(&diags) {
                bail!("destroy of {}.{} failed", kind, id);
            }
            println!("{} {}.{}", "Destroyed".green(), kind, id);
            Ok(())
        }
        Commands::Import { kind, id } => {
            let provider = connect(&cli.provider_config).await?;
            let (imported, diags) = provider.import(&kind, &id).await;
            if bag::report(&diags) {
                bail!("import of {} '{}' failed", kind, id);
            }
            let rendered: Vec<_> = imported.iter().map(bag::render).collect();
            println!("{}", serde_json::to_string_pretty(&rendered)?);
            Ok(())
        }
        Commands::Data { name, attributes } => {
            let provider = connect(&cli.provider_config).await?;
            let mut data = bag::load(&attributes)?;
            let diags = provider.read_data_source(&name, &mut data).await;
            finish(&data, &diags)
        }
    }
}

fn run_schema(kind: Option<&str>) -> Result<()> {
    let definition = provider();
    let mut schemas = vec![(definition.config_schema)()];
    schemas.extend(definition.resources.iter().map(|r| (r.schema)()));
    schemas.extend(definition.data_sources.iter().map(|d| (d.schema)()));

    let output: Vec<serde_json::Value> = match kind {
        Some(kind) => {
            let found: Vec<_> = schemas
                .iter()
                .filter(|s| s.resource_type == kind)
                .map(|s| s.to_json())
                .collect();
            if found.is_empty() {
                bail!("unknown resource type or data source '{}'", kind);
            }
            found
        }
        None => schemas.iter().map(|s| s.to_json()).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn connect(config_path: &Path) -> Result<ConfiguredProvider<CidaasClient>> {
    let config = bag::load(config_path).context("failed to load provider configuration")?;
    debug!("configuring provider from {}", config_path.display());
    provider().configure(config).await.map_err(|diags| {
        bag::report(&diags);
        anyhow!("provider configuration failed")
    })
}

fn stored(attributes: Option<&Path>, id: &str) -> Result<ResourceData> {
    let data = match attributes {
        Some(path) => bag::load(path)?,
        None => ResourceData::new(),
    };
    Ok(data.with_id(id))
}

fn finish(data: &ResourceData, diagnostics: &[cidaas_core::Diagnostic]) -> Result<()> {
    if bag::report(diagnostics) {
        bail!("operation failed");
    }
    println!("{}", serde_json::to_string_pretty(&bag::render(data))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_update_arguments() {
        let cli = Cli::try_parse_from([
            "cidaas",
            "update",
            "cidaas_role",
            "--id",
            "auditor",
            "--attributes",
            "desired.json",
            "--prior",
            "prior.json",
            "--provider-config",
            "tenant.json",
        ])
        .unwrap();
        assert_eq!(cli.provider_config, PathBuf::from("tenant.json"));
        match cli.command {
            Commands::Update { kind, id, prior, .. } => {
                assert_eq!(kind, "cidaas_role");
                assert_eq!(id, "auditor");
                assert_eq!(prior, PathBuf::from("prior.json"));
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn test_provider_config_defaults() {
        let cli = Cli::try_parse_from(["cidaas", "import", "cidaas_app", "c-1"]).unwrap();
        assert_eq!(cli.provider_config, PathBuf::from("provider.json"));
    }

    #[test]
    fn test_schema_for_known_kind() {
        assert!(run_schema(Some("cidaas_webhook")).is_ok());
        assert!(run_schema(Some("cidaas_nothing")).is_err());
    }

    #[test]
    fn test_stored_bag_carries_id() {
        let data = stored(None, "admin").unwrap();
        assert_eq!(data.id(), Some("admin"));
        assert!(data.attributes().is_empty());
    }
}
