pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "console")]
#[command(about = "SaaS Console - administer companies, subscriptions, employees and staff")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sign in, sign out and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Company management (superadmin)")]
    Company {
        #[command(subcommand)]
        cmd: commands::company::CompanyCommands,
    },

    #[command(about = "Employees of the signed-in company")]
    Employee {
        #[command(subcommand)]
        cmd: commands::employee::EmployeeCommands,
    },

    #[command(about = "Superadmin staff users")]
    Staff {
        #[command(subcommand)]
        cmd: commands::staff::StaffCommands,
    },

    #[command(about = "Pricing plans (superadmin)")]
    Plan {
        #[command(subcommand)]
        cmd: commands::plan::PlanCommands,
    },

    #[command(about = "Superadmin dashboard overview")]
    Dashboard,

    #[command(about = "Region lookup")]
    Region {
        #[command(subcommand)]
        cmd: commands::region::RegionCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = config::CliContext::load()?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx, output_format).await,
        Commands::Company { cmd } => commands::company::handle(cmd, &ctx, output_format).await,
        Commands::Employee { cmd } => commands::employee::handle(cmd, &ctx, output_format).await,
        Commands::Staff { cmd } => commands::staff::handle(cmd, &ctx, output_format).await,
        Commands::Plan { cmd } => commands::plan::handle(cmd, &ctx, output_format).await,
        Commands::Dashboard => commands::dashboard::handle(&ctx, output_format).await,
        Commands::Region { cmd } => commands::region::handle(cmd, &ctx, output_format).await,
    }
}
