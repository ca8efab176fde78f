//! Command-line front end for the item store.
//!
//! # Usage
//!
//! ```bash
//! item_cli --db items.db save --name apple --price 1000 --quantity 10
//! item_cli --db items.db update --id 1 --name apple --price 900 --quantity 12
//! item_cli --db items.db get --id 1
//! item_cli --db items.db list --name an --max-price 1000
//! ```
//!
//! Items are printed as JSON. Every global option may also come from the
//! environment: `ITEM_DB`, `ITEM_LOG_LEVEL`, `ITEM_LOG_DIR`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

use clap::Parser;
use cli::{Command, Opts};
use item_core::{
    default_log_level, init_logging, open_db, open_db_in_memory, DbError, ItemRepository,
    LoggingError, RepoError, SqliteItemRepository,
};
use log::{error, info};

mod cli;

#[derive(Debug)]
enum CliError {
    Logging(LoggingError),
    Db(DbError),
    Repo(RepoError),
    Json(serde_json::Error),
    /// Write command issued without a database file.
    MissingDatabase(&'static str),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "logging: {err}"),
            Self::Db(err) => write!(f, "database: {err}"),
            Self::Repo(err) => write!(f, "repository: {err}"),
            Self::Json(err) => write!(f, "output: {err}"),
            Self::MissingDatabase(command) => write!(
                f,
                "`{command}` needs --db (or ITEM_DB); an in-memory database would discard the change"
            ),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::MissingDatabase(_) => None,
        }
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    match run(opts) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: Opts) -> Result<String, CliError> {
    configure_logging(&opts)?;
    ensure_writes_persist(&opts)?;
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        item_core::core_version()
    );

    let conn = match &opts.db {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let repo = SqliteItemRepository::try_new(&conn)?;

    execute(&repo, opts.cmd)
}

fn configure_logging(opts: &Opts) -> Result<(), LoggingError> {
    let Some(log_dir) = opts.log_dir.as_deref() else {
        return Ok(());
    };
    let level = opts
        .log_level
        .map_or_else(|| default_log_level().to_string(), |level| level.to_string());
    init_logging(&level, log_dir)
}

fn ensure_writes_persist(opts: &Opts) -> Result<(), CliError> {
    if opts.db.is_some() {
        return Ok(());
    }
    match opts.cmd {
        Command::Save(_) => Err(CliError::MissingDatabase("save")),
        Command::Update(_) => Err(CliError::MissingDatabase("update")),
        Command::Get(_) | Command::List(_) => Ok(()),
    }
}

/// Runs one subcommand and renders its result for stdout.
fn execute(repo: &impl ItemRepository, cmd: Command) -> Result<String, CliError> {
    let output = match cmd {
        Command::Save(save) => {
            let saved = repo.save(&save.into())?;
            serde_json::to_string_pretty(&saved)?
        }
        Command::Update(update) => {
            let affected = repo.update(update.id, &(&update).into())?;
            format!("updated {affected} item(s)")
        }
        Command::Get(get) => match repo.find_by_id(get.id)? {
            Some(item) => serde_json::to_string_pretty(&item)?,
            None => format!("item {} not found", get.id),
        },
        Command::List(list) => {
            let items = repo.find_all(&list.into())?;
            serde_json::to_string_pretty(&items)?
        }
    };
    Ok(output)
}
