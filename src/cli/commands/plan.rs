use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde_json::json;

use crate::cli::config::CliContext;
use crate::cli::utils::{or_dash, output_record, output_success, render_table};
use crate::cli::OutputFormat;
use crate::models::{BillingPeriod, PricingPlanInput};
use crate::services::PricingPlanService;

const ROUTE: &str = "/pricing-plans";

#[derive(Args, Debug, Clone, Default)]
pub struct PlanLimits {
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "feature", help = "Feature line; repeat for several")]
    pub features: Vec<String>,
    #[arg(long)]
    pub max_users: Option<u32>,
    #[arg(long)]
    pub max_projects: Option<u32>,
    #[arg(long, help = "Storage quota in MB")]
    pub max_storage: Option<u64>,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    #[command(about = "List pricing plans")]
    List {
        #[arg(long, help = "Include deactivated plans")]
        include_inactive: bool,
    },

    #[command(about = "Show a pricing plan")]
    Show {
        id: String,
    },

    #[command(about = "Create a pricing plan")]
    Create {
        name: String,
        price: Decimal,
        #[arg(long, default_value = "MONTHLY")]
        period: BillingPeriod,
        #[arg(long)]
        inactive: bool,
        #[command(flatten)]
        limits: PlanLimits,
    },

    #[command(about = "Update a pricing plan; only the given fields change")]
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        period: Option<BillingPeriod>,
        #[arg(long, conflicts_with = "deactivate")]
        activate: bool,
        #[arg(long)]
        deactivate: bool,
        #[command(flatten)]
        limits: PlanLimits,
    },

    #[command(about = "Delete a pricing plan")]
    Delete {
        id: String,
    },
}

pub async fn handle(cmd: PlanCommands, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.require_route(ROUTE)?;
    let service = PricingPlanService::new(ctx.client.clone());

    match cmd {
        PlanCommands::List { include_inactive } => {
            let plans = service.list(include_inactive).await?;
            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "plans": plans }))?);
                }
                OutputFormat::Text => {
                    if plans.is_empty() {
                        println!("No plans found");
                    } else {
                        let rows: Vec<Vec<String>> = plans
                            .iter()
                            .map(|p| {
                                vec![
                                    p.id.clone(),
                                    p.name.clone(),
                                    p.price.to_string(),
                                    p.billing_period.as_str().to_string(),
                                    or_dash(p.max_users.map(|n| n.to_string()).as_deref()),
                                    p.is_active.to_string(),
                                    p.count.map(|c| c.subscriptions).unwrap_or_default().to_string(),
                                ]
                            })
                            .collect();
                        print!(
                            "{}",
                            render_table(
                                &["ID", "NAME", "PRICE", "PERIOD", "MAX USERS", "ACTIVE", "SUBSCRIPTIONS"],
                                &rows
                            )
                        );
                    }
                }
            }
            Ok(())
        }
        PlanCommands::Show { id } => {
            let plan = service.get(&id).await?;
            output_record(&output_format, &plan)
        }
        PlanCommands::Create {
            name,
            price,
            period,
            inactive,
            limits,
        } => {
            let input = PricingPlanInput {
                name: Some(name),
                price: Some(price),
                billing_period: Some(period),
                is_active: Some(!inactive),
                ..with_limits(limits)
            };
            let plan = service.create(&input).await?;
            output_success(
                &output_format,
                &format!("Plan '{}' created ({})", plan.name, plan.id),
                Some(json!({ "plan": plan })),
            )
        }
        PlanCommands::Update {
            id,
            name,
            price,
            period,
            activate,
            deactivate,
            limits,
        } => {
            let is_active = match (activate, deactivate) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let input = PricingPlanInput {
                name,
                price,
                billing_period: period,
                is_active,
                ..with_limits(limits)
            };
            let plan = service.update(&id, &input).await?;
            output_success(
                &output_format,
                &format!("Plan '{}' updated", plan.name),
                Some(json!({ "plan": plan })),
            )
        }
        PlanCommands::Delete { id } => {
            service.delete(&id).await?;
            output_success(&output_format, &format!("Plan '{}' deleted", id), None)
        }
    }
}

fn with_limits(limits: PlanLimits) -> PricingPlanInput {
    PricingPlanInput {
        description: limits.description,
        features: if limits.features.is_empty() {
            None
        } else {
            Some(limits.features)
        },
        max_users: limits.max_users,
        max_projects: limits.max_projects,
        max_storage: limits.max_storage,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_are_omitted_when_not_given() {
        let input = with_limits(PlanLimits {
            max_users: Some(25),
            ..Default::default()
        });
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, json!({ "maxUsers": 25 }));
    }
}
