use std::fmt::{self, Formatter};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use item_core::{Item, ItemSearchCond, ItemUpdateDto};

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub(crate) enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser, Debug)]
/// Item store utility - save, update and query items
///
/// `save` and `update` require `--db`; `get` and `list` without it see an empty
/// in-memory database.
#[command(author, version, about)]
pub(crate) struct Opts {
    #[command(subcommand)]
    pub cmd: Command,

    /// SQLite database file, created on first use; required by save and update
    #[arg(global = true, long, env = "ITEM_DB")]
    pub db: Option<PathBuf>,

    /// Log level; defaults to debug in debug builds and info otherwise
    #[arg(global = true, long, env = "ITEM_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Absolute directory for rolling log files; logging stays off if unset
    #[arg(global = true, long, env = "ITEM_LOG_DIR")]
    pub log_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Insert a new item and print it with its assigned id
    Save(Save),
    /// Overwrite name, price and quantity of an existing item
    Update(Update),
    /// Print one item by id
    Get(Get),
    /// List items, optionally filtered by name and maximum price
    List(List),
}

#[derive(Args, Debug)]
pub(crate) struct Save {
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub price: i32,
    #[arg(short, long)]
    pub quantity: i32,
}

#[derive(Args, Debug)]
pub(crate) struct Update {
    #[arg(short, long)]
    pub id: i64,
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub price: i32,
    #[arg(short, long)]
    pub quantity: i32,
}

#[derive(Args, Debug)]
pub(crate) struct Get {
    #[arg(short, long)]
    pub id: i64,
}

#[derive(Args, Debug)]
pub(crate) struct List {
    /// Only items whose name contains this text
    #[arg(short, long)]
    pub name: Option<String>,
    /// Only items priced at or below this value
    #[arg(short = 'm', long)]
    pub max_price: Option<i32>,
}

impl From<Save> for Item {
    fn from(save: Save) -> Self {
        Item::new(save.name, save.price, save.quantity)
    }
}

impl From<&Update> for ItemUpdateDto {
    fn from(update: &Update) -> Self {
        ItemUpdateDto::new(update.name.clone(), update.price, update.quantity)
    }
}

impl From<List> for ItemSearchCond {
    fn from(list: List) -> Self {
        ItemSearchCond::new(list.name, list.max_price)
    }
}
