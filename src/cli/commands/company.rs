use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};
use serde_json::json;

use super::{load_list, ListArgs};
use crate::cli::config::CliContext;
use crate::cli::utils::{load_upload, or_dash, output_page, output_record, output_success};
use crate::cli::OutputFormat;
use crate::list::{CompanyFilter, ListFilter, Pagination};
use crate::models::{BillingPeriod, CompanyStatus, CreateCompany, CreateCompanyUser, CreateSubscription, UpdateCompany};
use crate::services::CompanyService;

const ROUTE: &str = "/company";

#[derive(Args, Debug, Clone, Default)]
pub struct CompanyFields {
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub region_id: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,
    #[arg(long)]
    pub website: Option<String>,
    #[arg(long, help = "Path to a logo image")]
    pub logo: Option<String>,
}

#[derive(Subcommand)]
pub enum CompanyCommands {
    #[command(about = "List companies")]
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long, help = "TRIAL, ACTIVE, INACTIVE or SUSPENDED")]
        status: Option<String>,
    },

    #[command(about = "Show a company with its users")]
    Show {
        id: String,
    },

    #[command(about = "Create a company")]
    Create {
        name: String,
        #[arg(long, default_value = "ACTIVE")]
        status: CompanyStatus,
        #[command(flatten)]
        fields: CompanyFields,
    },

    #[command(about = "Update a company; only the given fields change")]
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        status: Option<CompanyStatus>,
        #[command(flatten)]
        fields: CompanyFields,
    },

    #[command(about = "Delete a company")]
    Delete {
        id: String,
    },

    #[command(about = "List the users of a company")]
    Users {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    #[command(about = "Create a user for a company")]
    AddUser {
        id: String,
        email: String,
        first_name: String,
        last_name: String,
        #[arg(long, default_value = "staff", help = "admin, manager or staff")]
        role: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        inactive: bool,
    },

    #[command(about = "Show a company's subscription")]
    Subscription {
        id: String,
    },

    #[command(about = "Subscribe a company to a pricing plan")]
    Subscribe {
        id: String,
        plan_id: String,
        #[arg(long, default_value = "MONTHLY")]
        period: BillingPeriod,
        #[arg(long, help = "Start date (YYYY-MM-DD), defaults to today")]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        no_auto_renew: bool,
    },
}

pub async fn handle(cmd: CompanyCommands, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.require_route(ROUTE)?;
    let service = CompanyService::new(ctx.client.clone());

    match cmd {
        CompanyCommands::List { list, status } => {
            let query = list.to_query()?;
            let filter = status.map(|status| CompanyFilter {
                status,
                ..CompanyFilter::from_query(&query)
            });
            let controller = load_list(service, query, filter).await?;

            let state = controller.state();
            output_page(
                &output_format,
                "companies",
                state.records(),
                state.pagination(),
                &["ID", "NAME", "STATUS", "EMAIL", "USERS"],
                |c| {
                    vec![
                        c.id.clone(),
                        c.name.clone(),
                        c.status.clone(),
                        or_dash(c.email.as_deref()),
                        c.count.map(|n| n.users.to_string()).unwrap_or_else(|| "-".to_string()),
                    ]
                },
            )
        }
        CompanyCommands::Show { id } => {
            let company = service.get(&id).await?;
            output_record(&output_format, &company)
        }
        CompanyCommands::Create { name, status, fields } => {
            let logo = load_upload(fields.logo).await?;
            let company = service
                .create(CreateCompany {
                    name,
                    email: fields.email,
                    phone: fields.phone,
                    region_id: fields.region_id,
                    address: fields.address,
                    postal_code: fields.postal_code,
                    latitude: fields.latitude,
                    longitude: fields.longitude,
                    website: fields.website,
                    status,
                    logo,
                })
                .await?;
            output_success(
                &output_format,
                &format!("Company '{}' created ({})", company.name, company.id),
                Some(json!({ "company": company })),
            )
        }
        CompanyCommands::Update { id, name, status, fields } => {
            let logo = load_upload(fields.logo).await?;
            let company = service
                .update(
                    &id,
                    UpdateCompany {
                        name,
                        email: fields.email,
                        phone: fields.phone,
                        region_id: fields.region_id,
                        address: fields.address,
                        postal_code: fields.postal_code,
                        latitude: fields.latitude,
                        longitude: fields.longitude,
                        website: fields.website,
                        status,
                        logo,
                    },
                )
                .await?;
            output_success(
                &output_format,
                &format!("Company '{}' updated", company.name),
                Some(json!({ "company": company })),
            )
        }
        CompanyCommands::Delete { id } => {
            service.delete(&id).await?;
            output_success(&output_format, &format!("Company '{}' deleted", id), None)
        }
        CompanyCommands::Users { id, page, limit } => {
            let users = service.users(&id, page, limit).await?;
            let mut pagination = Pagination::new(limit);
            pagination.update(&users.meta);
            output_page(
                &output_format,
                "users",
                &users.data,
                &pagination,
                &["ID", "NAME", "EMAIL", "ROLE", "ACTIVE"],
                |u| {
                    vec![
                        u.id.clone(),
                        format!("{} {}", u.first_name, u.last_name),
                        u.email.clone(),
                        or_dash(u.role.as_ref().map(|r| r.name.as_str())),
                        u.is_active.to_string(),
                    ]
                },
            )
        }
        CompanyCommands::AddUser {
            id,
            email,
            first_name,
            last_name,
            role,
            phone,
            inactive,
        } => {
            let user = service
                .add_user(
                    &id,
                    &CreateCompanyUser {
                        email,
                        first_name,
                        last_name,
                        phone,
                        country: None,
                        address: None,
                        city: None,
                        postal_code: None,
                        role_name: role,
                        is_active: Some(!inactive),
                    },
                )
                .await?;
            output_success(
                &output_format,
                &format!("User {} added to company {}", user.email, id),
                Some(json!({ "user": user })),
            )
        }
        CompanyCommands::Subscription { id } => {
            let subscription = service.subscription(&id).await?;
            match (&output_format, &subscription.subscription) {
                (OutputFormat::Text, None) => {
                    println!("{} has no subscription", subscription.company.name);
                    Ok(())
                }
                _ => output_record(&output_format, &subscription),
            }
        }
        CompanyCommands::Subscribe {
            id,
            plan_id,
            period,
            start_date,
            no_auto_renew,
        } => {
            let created = service
                .subscribe(&CreateSubscription {
                    plan_id,
                    company_id: id.clone(),
                    billing_period: period,
                    auto_renew: !no_auto_renew,
                    start_date: start_date.unwrap_or_else(|| Utc::now().date_naive()),
                })
                .await?;
            output_success(
                &output_format,
                &format!("Company {} subscribed ({})", id, period.as_str()),
                Some(json!({ "subscription": created })),
            )
        }
    }
}
