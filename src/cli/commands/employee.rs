use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde_json::json;

use super::{load_list, select_rows, ListArgs, RoleStatusArgs};
use crate::cli::config::CliContext;
use crate::cli::utils::{load_upload, or_dash, output_page, output_record, output_success};
use crate::cli::OutputFormat;
use crate::models::EmployeeInput;
use crate::services::EmployeeService;

#[derive(Args, Debug, Clone, Default)]
pub struct EmployeeFields {
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub salary: Option<Decimal>,
    #[arg(long, help = "Join date (RFC 3339)")]
    pub join_date: Option<DateTime<Utc>>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub region_id: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long, help = "Path to a photo")]
    pub photo: Option<String>,
    #[arg(long, help = "Path to an avatar image")]
    pub avatar: Option<String>,
}

impl EmployeeFields {
    async fn into_input(self) -> anyhow::Result<EmployeeInput> {
        let (photo, avatar) = futures::try_join!(load_upload(self.photo), load_upload(self.avatar))?;
        Ok(EmployeeInput {
            employee_code: self.code,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            department: self.department,
            salary: self.salary,
            join_date: self.join_date,
            status: self.status,
            region_id: self.region_id,
            address: self.address,
            postal_code: self.postal_code,
            photo,
            avatar,
        })
    }
}

#[derive(Subcommand)]
pub enum EmployeeCommands {
    #[command(about = "List employees")]
    List {
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        filter: RoleStatusArgs,
    },

    #[command(about = "Show an employee")]
    Show {
        id: String,
    },

    #[command(about = "Create an employee; unset fields get defaults")]
    Create {
        #[command(flatten)]
        fields: EmployeeFields,
    },

    #[command(about = "Update an employee; only the given fields change")]
    Update {
        id: String,
        #[command(flatten)]
        fields: EmployeeFields,
    },

    #[command(about = "Delete an employee")]
    Delete {
        id: String,
    },

    #[command(about = "Delete several employees from one page of the list")]
    BulkDelete {
        #[arg(help = "Employee ids on the loaded page")]
        ids: Vec<String>,
        #[arg(long, conflicts_with = "ids", help = "Select every row on the page")]
        all: bool,
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        filter: RoleStatusArgs,
    },
}

pub async fn handle(cmd: EmployeeCommands, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let service = EmployeeService::new(ctx.client.clone());

    match cmd {
        EmployeeCommands::List { list, filter } => {
            let query = list.to_query()?;
            let filter = filter.to_filter(&query);
            let controller = load_list(service, query, filter).await?;

            let state = controller.state();
            output_page(
                &output_format,
                "employees",
                state.records(),
                state.pagination(),
                &["ID", "CODE", "NAME", "POSITION", "DEPARTMENT", "STATUS"],
                |e| {
                    vec![
                        e.id.clone(),
                        e.employee_code.clone(),
                        format!("{} {}", e.first_name, e.last_name),
                        or_dash(e.position.as_deref()),
                        or_dash(e.department.as_deref()),
                        e.status.clone(),
                    ]
                },
            )
        }
        EmployeeCommands::Show { id } => {
            let employee = service.get(&id).await?;
            output_record(&output_format, &employee)
        }
        EmployeeCommands::Create { fields } => {
            let employee = service.create(fields.into_input().await?).await?;
            output_success(
                &output_format,
                &format!("Employee {} created ({})", employee.employee_code, employee.id),
                Some(json!({ "employee": employee })),
            )
        }
        EmployeeCommands::Update { id, fields } => {
            let employee = service.update(&id, fields.into_input().await?).await?;
            output_success(
                &output_format,
                &format!("Employee {} updated", employee.employee_code),
                Some(json!({ "employee": employee })),
            )
        }
        EmployeeCommands::Delete { id } => {
            service.delete(&id).await?;
            output_success(&output_format, &format!("Employee '{}' deleted", id), None)
        }
        EmployeeCommands::BulkDelete { ids, all, list, filter } => {
            let query = list.to_query()?;
            let filter = filter.to_filter(&query);
            let mut controller = load_list(service.clone(), query, filter).await?;

            let selected = select_rows(&mut controller, &ids, all);
            if selected.is_empty() {
                anyhow::bail!("No employees selected");
            }

            let result = service.bulk_delete(&selected).await?;
            output_success(
                &output_format,
                &format!("Deleted {} employee(s)", selected.len()),
                Some(json!({ "ids": selected, "result": result })),
            )
        }
    }
}
