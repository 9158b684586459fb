use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tenant_portal::config::get_configuration;
use tenant_portal::error::LoginError;
use tenant_portal::models::{LoginForm, LoginOutcome, RegistrationInput, Sector};
use tenant_portal::services::ConsoleNotifier;
use tenant_portal::validation::FieldErrors;
use tenant_portal::wizard::{RegistrationWizard, WizardError};
use tenant_portal::AppState;
use tracing::info;

/// Tenant onboarding client for the marketplace auth API
#[derive(Parser)]
#[command(name = "tenant-portal")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the industry sectors a tenant can select
    Sectors,

    /// Register a tenant from a JSON form document
    Register {
        /// Path to the registration form (camelCase JSON)
        #[arg(long)]
        input: PathBuf,
    },

    /// Request access for an existing account
    Login {
        #[arg(long)]
        email: String,

        /// Only used when the deployment runs credentialed login
        #[arg(long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();
    let cli = Cli::parse();

    if let Command::Sectors = cli.command {
        for sector in Sector::all() {
            println!("{}  {}", sector.id, sector.name);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let telemetry = &configuration.telemetry;
    service_core::observability::init_tracing(
        &telemetry.service_name,
        &telemetry.log_level,
        telemetry.otlp_endpoint.as_deref(),
    )?;

    let state = AppState::new(&configuration, Arc::new(ConsoleNotifier))
        .context("Failed to build auth API client")?;

    match cli.command {
        Command::Sectors => Ok(ExitCode::SUCCESS),
        Command::Register { input } => register(&state, input).await,
        Command::Login { email, password } => {
            let form = LoginForm {
                email,
                password: password.map(Into::into),
            };
            login(&state, &form).await
        }
    }
}

async fn register(state: &AppState, path: PathBuf) -> anyhow::Result<ExitCode> {
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let input: RegistrationInput = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let mut wizard = RegistrationWizard::with_input(
        input,
        state.registration.clone(),
        state.notifier.clone(),
    );

    info!(step = ?wizard.step(), progress = wizard.progress(), "Validating organization details");
    if let Err(e) = wizard.advance() {
        return report_wizard_error(e);
    }

    info!(step = ?wizard.step(), progress = wizard.progress(), "Submitting registration");
    match wizard.submit().await {
        Ok(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => report_wizard_error(e),
    }
}

async fn login(state: &AppState, form: &LoginForm) -> anyhow::Result<ExitCode> {
    match state.login.request_login(form).await {
        Ok(LoginOutcome::LinkSent(_)) => Ok(ExitCode::SUCCESS),
        Ok(LoginOutcome::SessionStarted(user)) => {
            println!("{}", serde_json::to_string_pretty(&user)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(LoginError::Invalid(errors)) => {
            print_field_errors(&errors);
            Ok(ExitCode::FAILURE)
        }
        // The login service has already notified the user.
        Err(e) if e.is_notified() => Ok(ExitCode::FAILURE),
        Err(e) => Err(e.into()),
    }
}

fn report_wizard_error(error: WizardError) -> anyhow::Result<ExitCode> {
    if let Some(errors) = error.field_errors() {
        print_field_errors(errors);
        return Ok(ExitCode::FAILURE);
    }
    if error.is_notified() {
        return Ok(ExitCode::FAILURE);
    }
    Err(error.into())
}

fn print_field_errors(errors: &FieldErrors) {
    for field in errors.iter() {
        eprintln!("{}: {}", field.path, field.message);
    }
}
