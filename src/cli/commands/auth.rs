use clap::Subcommand;
use serde_json::json;

use crate::cli::config::CliContext;
use crate::cli::utils::{output_record, output_success, resolve_password};
use crate::cli::OutputFormat;
use crate::services::AuthService;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Sign in and store the session")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (read from CONSOLE_PASSWORD or stdin if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show the signed-in user as the backend sees it")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let password = resolve_password(password)?;
            let auth = AuthService::new(ctx.client.clone());
            let session = auth.sign_in(&email, &password).await?;
            ctx.remember(&session)?;

            output_success(
                &output_format,
                &format!("Signed in as {} ({})", session.user_name, session.authority.join(", ")),
                Some(json!({
                    "email": session.email,
                    "authority": session.authority,
                    "isSuperAdmin": session.is_super_admin,
                })),
            )
        }
        AuthCommands::Logout => {
            ctx.forget()?;
            output_success(&output_format, "Signed out", None)
        }
        AuthCommands::Status => {
            let session = ctx.session()?;
            match (&output_format, session) {
                (OutputFormat::Json, None) => output_success(&output_format, "Not signed in", Some(json!({"authenticated": false}))),
                (OutputFormat::Text, None) => {
                    println!("Not signed in");
                    Ok(())
                }
                (_, Some(session)) => {
                    let expires = session.token_expiry().map(|t| t.to_rfc3339());
                    let expired = ctx.is_expired(&session);
                    output_success(
                        &output_format,
                        &format!(
                            "Signed in as {}{}",
                            session.email,
                            match (&expires, expired) {
                                (_, true) => " (session expired)".to_string(),
                                (Some(at), false) => format!(" (token valid until {})", at),
                                (None, false) => String::new(),
                            }
                        ),
                        Some(json!({
                            "authenticated": !expired,
                            "email": session.email,
                            "authority": session.authority,
                            "expiresAt": expires,
                        })),
                    )
                }
            }
        }
        AuthCommands::Whoami => {
            let session = ctx
                .session()?
                .ok_or_else(|| anyhow::anyhow!("Not logged in. Run `console auth login <email>` first"))?;
            let auth = AuthService::new(ctx.client.clone());
            let user = auth.profile(&session.access_token).await?;
            output_record(&output_format, &user)
        }
    }
}
