use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use staffdesk::api::types::{AttendanceFilters, Credentials, NewMessage};
use staffdesk::config::{BASE_URL_VAR, TOKEN_PATH_VAR};
use staffdesk::token::{FileTokenStore, SharedTokenStore};
use staffdesk::{ApiClient, ClientConfig, ClientError, ConfigError, SessionManager};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("not signed in; run `staffdesk login`")]
    NotSignedIn,
    #[error("missing password; pass --password or set STAFFDESK_PASSWORD")]
    MissingPassword,
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "staffdesk", about = "Staff management API client")]
struct Cli {
    #[arg(long, env = BASE_URL_VAR)]
    base_url: Option<String>,

    #[arg(long, env = TOKEN_PATH_VAR)]
    token_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "STAFFDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    Logout,
    /// Resolve the stored token and print the signed-in user.
    Whoami,
    Users(UsersCommand),
    Dashboard(DashboardCommand),
    Projects(ProjectsCommand),
    Reports(ReportsCommand),
    Leave(LeaveCommand),
    Attendance(AttendanceCommand),
    Messages(MessagesCommand),
    Logo(LogoCommand),
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List,
    Get { user_id: String },
}

#[derive(Args, Debug)]
struct DashboardCommand {
    #[command(subcommand)]
    command: DashboardSubcommand,
}

#[derive(Subcommand, Debug)]
enum DashboardSubcommand {
    Admin,
    Employee,
}

#[derive(Args, Debug)]
struct ProjectsCommand {
    #[command(subcommand)]
    command: ProjectsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProjectsSubcommand {
    List,
    Get { project_id: String },
}

#[derive(Args, Debug)]
struct ReportsCommand {
    #[command(subcommand)]
    command: ReportsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReportsSubcommand {
    Mine,
    All,
    Get { report_id: String },
}

#[derive(Args, Debug)]
struct LeaveCommand {
    #[command(subcommand)]
    command: LeaveSubcommand,
}

#[derive(Subcommand, Debug)]
enum LeaveSubcommand {
    Mine,
    All,
    Cancel { request_id: String },
}

#[derive(Args, Debug)]
struct AttendanceCommand {
    #[command(subcommand)]
    command: AttendanceSubcommand,
}

#[derive(Subcommand, Debug)]
enum AttendanceSubcommand {
    ClockIn,
    ClockOut,
    Status,
    List {
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Args, Debug)]
struct MessagesCommand {
    #[command(subcommand)]
    command: MessagesSubcommand,
}

#[derive(Subcommand, Debug)]
enum MessagesSubcommand {
    List,
    Unread,
    Send {
        #[arg(long)]
        to: String,
        #[arg(long)]
        content: String,
    },
    ReadAll,
}

#[derive(Args, Debug)]
struct LogoCommand {
    #[command(subcommand)]
    command: LogoSubcommand,
}

#[derive(Subcommand, Debug)]
enum LogoSubcommand {
    Upload { path: PathBuf },
    Url,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if let Some(hint) = failure_hint(&e) {
                eprintln!("hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Follow-up advice for errors the user can fix by signing in again.
fn failure_hint(err: &CliError) -> Option<&'static str> {
    match err {
        CliError::Client(e) if e.is_unauthorized() => Some("the stored session was rejected; run `staffdesk login`"),
        _ => None,
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    ClientConfig::from_lookup(|key| match key {
        BASE_URL_VAR => cli.base_url.clone(),
        TOKEN_PATH_VAR => cli.token_path.as_ref().map(|p| p.display().to_string()),
        _ => std::env::var(key).ok(),
    })
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let tokens: SharedTokenStore = Arc::new(FileTokenStore::new(&config.token_path));
    let api = ApiClient::new(&config, tokens)?;

    match cli.command {
        Command::Login { username, password } => {
            let password = password.ok_or(CliError::MissingPassword)?;
            let session = SessionManager::new(api);
            let user = session.login(&Credentials::new(username, password)).await?;
            print_json(&user)
        }
        Command::Logout => {
            SessionManager::new(api).logout();
            Ok(())
        }
        Command::Whoami => {
            let session = SessionManager::start(api).await.session();
            let user = session.user.ok_or(CliError::NotSignedIn)?;
            print_json(&user)
        }
        Command::Users(cmd) => match cmd.command {
            UsersSubcommand::List => print_json(&api.fetch_users().await?),
            UsersSubcommand::Get { user_id } => print_json(&api.fetch_user(&user_id).await?),
        },
        Command::Dashboard(cmd) => match cmd.command {
            DashboardSubcommand::Admin => print_json(&api.fetch_admin_dashboard().await?),
            DashboardSubcommand::Employee => print_json(&api.fetch_employee_dashboard().await?),
        },
        Command::Projects(cmd) => match cmd.command {
            ProjectsSubcommand::List => print_json(&api.fetch_projects().await?),
            ProjectsSubcommand::Get { project_id } => print_json(&api.fetch_project(&project_id).await?),
        },
        Command::Reports(cmd) => match cmd.command {
            ReportsSubcommand::Mine => print_json(&api.fetch_my_work_reports().await?),
            ReportsSubcommand::All => print_json(&api.fetch_all_work_reports().await?),
            ReportsSubcommand::Get { report_id } => print_json(&api.fetch_work_report(&report_id).await?),
        },
        Command::Leave(cmd) => match cmd.command {
            LeaveSubcommand::Mine => print_json(&api.fetch_my_leave_requests().await?),
            LeaveSubcommand::All => print_json(&api.fetch_all_leave_requests().await?),
            LeaveSubcommand::Cancel { request_id } => print_json(&api.cancel_leave_request(&request_id).await?),
        },
        Command::Attendance(cmd) => match cmd.command {
            AttendanceSubcommand::ClockIn => print_json(&api.clock_in().await?),
            AttendanceSubcommand::ClockOut => print_json(&api.clock_out().await?),
            AttendanceSubcommand::Status => print_json(&api.fetch_my_attendance_status().await?),
            AttendanceSubcommand::List { user_id, date } => {
                print_json(&api.fetch_attendance_records(&AttendanceFilters { user_id, date }).await?)
            }
        },
        Command::Messages(cmd) => match cmd.command {
            MessagesSubcommand::List => print_json(&api.fetch_my_messages().await?),
            MessagesSubcommand::Unread => print_json(&api.fetch_unread_message_count().await?),
            MessagesSubcommand::Send { to, content } => {
                print_json(&api.send_message(&NewMessage { recipient_id: to, content }).await?)
            }
            MessagesSubcommand::ReadAll => Ok(api.mark_all_messages_read().await?),
        },
        Command::Logo(cmd) => match cmd.command {
            LogoSubcommand::Upload { path } => {
                let bytes = std::fs::read(&path).map_err(|source| CliError::ReadFile { path: path.clone(), source })?;
                print_json(&api.upload_logo(bytes, logo_mime(&path)).await?)
            }
            LogoSubcommand::Url => {
                println!("{}", api.logo_url());
                Ok(())
            }
        },
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn logo_mime(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
