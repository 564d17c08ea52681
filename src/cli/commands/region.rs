use clap::Subcommand;
use serde_json::json;

use crate::cli::config::CliContext;
use crate::cli::utils::{or_dash, render_table};
use crate::cli::OutputFormat;
use crate::services::RegionService;

#[derive(Subcommand)]
pub enum RegionCommands {
    #[command(about = "Search regions by name")]
    Search {
        term: String,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
}

pub async fn handle(cmd: RegionCommands, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let service = RegionService::new(ctx.client.clone());

    match cmd {
        RegionCommands::Search { term, limit } => {
            let regions = service.search(&term, limit).await?;
            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "regions": regions }))?);
                }
                OutputFormat::Text if regions.is_empty() => println!("No regions match '{}'", term),
                OutputFormat::Text => {
                    let rows: Vec<Vec<String>> = regions
                        .iter()
                        .map(|r| vec![r.id.clone(), r.full_name.clone(), or_dash(r.postal_code.as_deref())])
                        .collect();
                    print!("{}", render_table(&["ID", "REGION", "POSTAL CODE"], &rows));
                }
            }
            Ok(())
        }
    }
}
