use clap::{Args, Subcommand};
use serde_json::json;

use super::{load_list, select_rows, ListArgs, RoleStatusArgs};
use crate::cli::config::CliContext;
use crate::cli::utils::{load_upload, or_dash, output_page, output_record, output_success};
use crate::cli::OutputFormat;
use crate::models::StaffInput;
use crate::services::StaffService;

const ROUTE: &str = "/users";

#[derive(Args, Debug, Clone, Default)]
pub struct StaffFields {
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long, help = "Path to an avatar image")]
    pub avatar: Option<String>,
}

impl StaffFields {
    async fn into_input(self) -> anyhow::Result<StaffInput> {
        Ok(StaffInput {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            country: self.country,
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            avatar: load_upload(self.avatar).await?,
        })
    }
}

#[derive(Subcommand)]
pub enum StaffCommands {
    #[command(about = "List staff users")]
    List {
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        filter: RoleStatusArgs,
    },

    #[command(about = "Show a staff user")]
    Show {
        id: String,
    },

    #[command(about = "Create a staff user")]
    Create {
        #[command(flatten)]
        fields: StaffFields,
    },

    #[command(about = "Update a staff user; only the given fields change")]
    Update {
        id: String,
        #[command(flatten)]
        fields: StaffFields,
    },

    #[command(about = "Delete a staff user")]
    Delete {
        id: String,
    },

    #[command(about = "Delete several staff users from one page of the list")]
    BulkDelete {
        #[arg(help = "Staff ids on the loaded page")]
        ids: Vec<String>,
        #[arg(long, conflicts_with = "ids", help = "Select every row on the page")]
        all: bool,
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        filter: RoleStatusArgs,
    },
}

pub async fn handle(cmd: StaffCommands, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.require_route(ROUTE)?;
    let service = StaffService::new(ctx.client.clone());

    match cmd {
        StaffCommands::List { list, filter } => {
            let query = list.to_query()?;
            let filter = filter.to_filter(&query);
            let controller = load_list(service, query, filter).await?;

            let state = controller.state();
            output_page(
                &output_format,
                "staff",
                state.records(),
                state.pagination(),
                &["ID", "NAME", "EMAIL", "ROLE", "ACTIVE"],
                |s| {
                    vec![
                        s.id.clone(),
                        format!("{} {}", s.first_name, s.last_name),
                        s.email.clone(),
                        or_dash(s.role.as_ref().map(|r| r.name.as_str())),
                        s.is_active.to_string(),
                    ]
                },
            )
        }
        StaffCommands::Show { id } => {
            let staff = service.get(&id).await?;
            output_record(&output_format, &staff)
        }
        StaffCommands::Create { fields } => {
            let staff = service.create(fields.into_input().await?).await?;
            output_success(
                &output_format,
                &format!("Staff user {} created ({})", staff.email, staff.id),
                Some(json!({ "staff": staff })),
            )
        }
        StaffCommands::Update { id, fields } => {
            let staff = service.update(&id, fields.into_input().await?).await?;
            output_success(
                &output_format,
                &format!("Staff user {} updated", staff.email),
                Some(json!({ "staff": staff })),
            )
        }
        StaffCommands::Delete { id } => {
            service.delete(&id).await?;
            output_success(&output_format, &format!("Staff user '{}' deleted", id), None)
        }
        StaffCommands::BulkDelete { ids, all, list, filter } => {
            let query = list.to_query()?;
            let filter = filter.to_filter(&query);
            let mut controller = load_list(service.clone(), query, filter).await?;

            let selected = select_rows(&mut controller, &ids, all);
            if selected.is_empty() {
                anyhow::bail!("No staff users selected");
            }

            let result = service.bulk_delete(&selected).await?;
            output_success(
                &output_format,
                &format!("Deleted {} staff user(s)", selected.len()),
                Some(json!({ "ids": selected, "result": result })),
            )
        }
    }
}
