use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use petsync_infrastructure::{AppConfig, PetSyncPaths};
use std::path::PathBuf;
use std::process::ExitCode;

mod bootstrap;
mod commands;
mod logging;
mod output;

use bootstrap::App;
use chrono::NaiveDate;

#[derive(Parser)]
#[command(name = "petsync")]
#[command(about = "PetSync CLI - track feedings, activities and medical history of your pets", long_about = None)]
struct Cli {
    /// Keep config, storage and logs under this directory instead of the
    /// platform config directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Also print logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register(RegisterArgs),
    /// Sign out and forget the stored session and pet selection
    Logout,
    /// Show the signed-in user and the active pet
    Whoami,
    /// Account settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Account lifecycle
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Password recovery
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },
    /// Manage pets
    Pets {
        #[command(subcommand)]
        action: PetAction,
    },
    /// Look up dog breeds
    Breeds {
        #[command(subcommand)]
        action: BreedAction,
    },
    /// Feedings of the active pet
    Feedings {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Daily activities of the active pet
    Activities {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Medical history of the active pet
    Medical {
        #[command(subcommand)]
        action: RecordAction,
    },
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub surname: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub password: String,
    /// yyyy-mm-dd
    #[arg(long)]
    pub birthday: NaiveDate,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Update profile fields; omitted fields keep their value
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        surname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        birthday: Option<NaiveDate>,
        /// New password (requires --confirm-password)
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// Delete the account and sign out
    Delete {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum PasswordAction {
    /// Request a password reset email
    Forgot {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with the token from the reset email
    Reset {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
}

#[derive(Args, Default)]
pub struct PetFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub breed: Option<String>,
    /// male or female
    #[arg(long)]
    pub gender: Option<String>,
    /// Kilograms
    #[arg(long)]
    pub weight: Option<f64>,
    /// yyyy-mm-dd
    #[arg(long)]
    pub birthday: Option<NaiveDate>,
    /// Photo URL; looked up by breed when omitted
    #[arg(long)]
    pub photo: Option<String>,
}

#[derive(Subcommand)]
pub enum PetAction {
    /// List pets with full details
    List,
    /// Add a pet
    Create(PetFields),
    /// Edit a pet; omitted fields keep their value
    Update {
        id: i64,
        #[command(flatten)]
        fields: PetFields,
    },
    /// Delete a pet
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Make a pet the active one for record commands
    Select { id: i64 },
    /// List pets matching all given criteria
    Filter {
        /// Name contains (case-insensitive)
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        /// Inclusive, kilograms
        #[arg(long)]
        max_weight: Option<f64>,
    },
}

#[derive(Subcommand)]
pub enum BreedAction {
    /// Suggest breeds containing the query (at least 2 characters)
    Search { query: String },
}

/// Record fields; each record kind reads the ones it has.
///
/// - feedings: type, description, quantity (grams), date
/// - activities: type, duration (minutes), notes, date
/// - medical: type, description, date
#[derive(Args, Default)]
pub struct RecordFields {
    #[arg(long = "type")]
    pub kind: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub quantity: Option<u32>,
    #[arg(long)]
    pub duration: Option<u32>,
    #[arg(long)]
    pub notes: Option<String>,
    /// yyyy-mm-dd
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum RecordAction {
    /// List records of the active pet
    List,
    /// Add a record to the active pet
    Add(RecordFields),
    /// Edit a record; omitted fields keep their value
    Edit {
        id: i64,
        #[command(flatten)]
        fields: RecordFields,
    },
    /// Delete a record
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Show the allowed values of --type
    Types,
}

async fn run(cli: Cli) -> Result<()> {
    let paths = PetSyncPaths::new(cli.data_dir.as_deref());
    let config = AppConfig::load(&paths)?;
    let _log_guard = logging::init(&paths.logs_dir()?, &config.log_level, cli.verbose)?;
    tracing::debug!(api_url = %config.api_url, "[Main] Configuration loaded");

    let mut app = App::build(&paths, &config)?;
    let result = commands::dispatch(&app, cli.command).await;
    app.flush_notifications();
    result
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.downcast_ref::<output::Reported>().is_none() {
                eprintln!("{} {e:#}", "error:".red().bold());
            }
            ExitCode::FAILURE
        }
    }
}
