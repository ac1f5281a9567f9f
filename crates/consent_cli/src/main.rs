//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise the purpose DAO against a SQLite file from the shell.
//! - Keep output line-oriented and deterministic for scripted checks.
//!
//! Set `CONSENT_LOG_DIR` to an absolute path to enable file logging.

use clap::{Parser, Subcommand};
use consent_core::{
    default_log_level, init_logging, ConsentError, DataSourceConfig, FileConnectionProvider,
    Purpose, PurposeDao, SqlitePurposeDao,
};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "CONSENT_LOG_DIR";

#[derive(Parser)]
#[command(name = "consent_cli")]
#[command(about = "Purpose data-access smoke tool", version)]
struct Cli {
    /// SQLite database file; created and bootstrapped when missing
    db_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Insert a purpose and print it with its generated id
    Add {
        name: String,
        description: Option<String>,
    },
    /// Print one purpose by id
    Get { id: i64 },
    /// Print one page of purposes ordered by id
    List {
        #[arg(default_value_t = 10, allow_negative_numbers = true)]
        limit: i64,
        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
    /// Delete a purpose by id
    Delete { id: i64 },
}

impl Command {
    fn label(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Get { .. } => "get",
            Self::List { .. } => "list",
            Self::Delete { .. } => "delete",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let provider = match FileConnectionProvider::new(DataSourceConfig::file(&cli.db_path)) {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("failed to open database: {err}");
            return ExitCode::FAILURE;
        }
    };
    let dao = SqlitePurposeDao::new(provider);
    let label = cli.command.label();

    match run(&dao, cli.command) {
        Ok(()) => {
            info!("event=cli_command module=cli status=ok command={label}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(
                "event=cli_command module=cli status=error command={} error_code={}",
                label,
                err.code()
            );
            eprintln!("{err}");
            if let Some(cause) = err.cause() {
                eprintln!("caused by: {cause}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(dao: &impl PurposeDao, command: Command) -> Result<(), ConsentError> {
    match command {
        Command::Add { name, description } => {
            let created = dao.add_purpose(&Purpose::new(name, description))?;
            print_purpose(&created);
        }
        Command::Get { id } => print_purpose(&dao.get_purpose_by_id(id)?),
        Command::List { limit, offset } => {
            for purpose in dao.list_purposes(limit, offset)? {
                print_purpose(&purpose);
            }
        }
        Command::Delete { id } => println!("deleted id={}", dao.delete_purpose(id)?),
    }
    Ok(())
}

fn print_purpose(purpose: &Purpose) {
    println!(
        "id={} name={} description={}",
        purpose.id().unwrap_or_default(),
        purpose.name(),
        purpose.description().unwrap_or("-")
    );
}
