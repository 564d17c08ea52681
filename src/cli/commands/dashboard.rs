use crate::cli::config::CliContext;
use crate::cli::utils::{or_dash, render_table};
use crate::cli::OutputFormat;
use crate::services::DashboardService;

const ROUTE: &str = "/dashboard";

pub async fn handle(ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.require_route(ROUTE)?;
    let overview = DashboardService::new(ctx.client.clone()).overview().await?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&overview)?),
        OutputFormat::Text => {
            let stats = &overview.stats;
            println!("Companies:            {} ({} active)", stats.total_companies, stats.active_companies);
            println!("Users:                {}", stats.total_users);
            println!("Plans:                {}", stats.total_plans);
            println!("Active subscriptions: {}", stats.active_subscriptions);
            println!("Monthly revenue:      {}", overview.revenue.monthly_revenue);
            println!("Yearly revenue:       {}", overview.revenue.yearly_revenue);

            if !overview.recent_companies.is_empty() {
                println!();
                println!("Recent companies:");
                let rows: Vec<Vec<String>> = overview
                    .recent_companies
                    .iter()
                    .map(|c| {
                        vec![
                            c.name.clone(),
                            c.status.clone(),
                            or_dash(c.email.as_deref()),
                            c.created_at
                                .map(|at| at.format("%Y-%m-%d").to_string())
                                .unwrap_or_else(|| "-".to_string()),
                        ]
                    })
                    .collect();
                print!("{}", render_table(&["NAME", "STATUS", "EMAIL", "CREATED"], &rows));
            }
        }
    }
    Ok(())
}
