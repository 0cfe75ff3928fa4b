//! Sign-in, sign-out, and identity commands.

use clap::Args;
use serde::Serialize;

use ged_core::error::AppError;

use super::{Context, describe_permissions};
use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Login email (will prompt if not provided)
    #[arg(short, long)]
    pub email: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Identity summary for `whoami`
#[derive(Debug, Serialize)]
struct Identity {
    user_id: i64,
    name: Option<String>,
    email: Option<String>,
    account_kind: String,
    collaborator: bool,
    active_company: String,
    company_type: String,
    permissions: String,
    language: Option<String>,
}

/// Execute `login`
pub async fn login(args: &LoginArgs, ctx: &Context) -> Result<(), AppError> {
    let email = match &args.email {
        Some(e) => e.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    let outcome = ctx
        .services
        .auth
        .login(&email, &password, &ctx.cancel)
        .await?;

    let store = ctx.resolver.store();
    if store.language().await?.is_none() {
        store.set_language(&ctx.config.ui.language).await?;
    }

    output::print_success(&outcome.response.message);
    let principal = &outcome.session.principal;
    output::print_kv("Signed in as", &principal.label());
    output::print_kv("Account", principal.account_kind.as_str());
    if principal.is_collaborator {
        output::print_kv("Company", &outcome.session.company_id().to_string());
    }
    if outcome.response.needs_registration() {
        output::print_warning("Registration is incomplete; finish it on the web before using the GED");
    }
    Ok(())
}

/// Execute `logout`
pub async fn logout(ctx: &Context) -> Result<(), AppError> {
    ctx.services.auth.logout().await?;
    output::print_success("Signed out");
    Ok(())
}

/// Execute `whoami`
pub async fn whoami(ctx: &Context) -> Result<(), AppError> {
    let session = ctx.resolver.current().await?;
    let principal = &session.principal;
    let identity = Identity {
        user_id: principal.user_id.get(),
        name: principal.display_name.clone(),
        email: principal.email.clone(),
        account_kind: principal.account_kind.to_string(),
        collaborator: principal.is_collaborator,
        active_company: session.context.active_company.to_string(),
        company_type: session.company_type().to_string(),
        permissions: describe_permissions(&session.effective_permissions()),
        language: ctx.resolver.store().language().await?,
    };

    match ctx.format {
        OutputFormat::Json => output::print_json(&identity, "{}"),
        OutputFormat::Table => {
            output::print_kv("User", &identity.user_id.to_string());
            output::print_kv("Name", &output::or_dash(identity.name.as_deref()));
            output::print_kv("Email", &output::or_dash(identity.email.as_deref()));
            output::print_kv("Account", &identity.account_kind);
            output::print_kv("Collaborator", output::yes_no(identity.collaborator));
            output::print_kv("Active company", &identity.active_company);
            output::print_kv("Company type", &identity.company_type);
            output::print_kv("Permissions", &identity.permissions);
            output::print_kv("Language", &output::or_dash(identity.language.as_deref()));
        }
    }
    Ok(())
}
