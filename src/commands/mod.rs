//! Command-line front end.
//!
//! Every subcommand resolves the board once (`--board` or the persisted
//! current board), opens its store, and calls into the core. Task arguments
//! accept an id or part of a title.

pub mod board;
pub mod config;
pub mod init;
pub mod link;
pub mod mcp;
pub mod migrations;
pub mod task;

use crate::db::db::Db;
use crate::libs::board::{BoardRegistry, DEFAULT_BOARD};
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_debug};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create the board store if it does not exist")]
    Init,
    #[command(about = "Add a task", arg_required_else_help = true)]
    Add(task::AddArgs),
    #[command(about = "List active tasks, optionally filtered by status")]
    List(task::ListArgs),
    #[command(about = "Show the board as kanban columns")]
    View,
    #[command(about = "Show one task", arg_required_else_help = true)]
    Get(task::TaskRefArgs),
    #[command(about = "Move a task to todo, doing or done", arg_required_else_help = true)]
    Move(task::MoveArgs),
    #[command(about = "Replace a task's title and description", arg_required_else_help = true)]
    Update(task::UpdateArgs),
    #[command(about = "Set a task's priority (none, low, medium, high, critical or 0-4)", arg_required_else_help = true)]
    Priority(task::PriorityArgs),
    #[command(about = "Delete a task (restorable unless --hard)", arg_required_else_help = true)]
    Delete(task::DeleteArgs),
    #[command(about = "Restore a deleted task by ID", arg_required_else_help = true)]
    Restore(task::RestoreArgs),
    #[command(about = "Link two tasks", arg_required_else_help = true)]
    Link(link::LinkArgs),
    #[command(about = "Remove a link between two tasks", arg_required_else_help = true)]
    Unlink(link::LinkArgs),
    #[command(about = "Show the links of a task", arg_required_else_help = true)]
    Links(task::TaskRefArgs),
    #[command(about = "Fuzzy search tasks by title", arg_required_else_help = true)]
    Search(task::SearchArgs),
    #[command(about = "Manage boards")]
    Board(board::BoardArgs),
    #[command(about = "Show or change configuration")]
    Config(config::ConfigArgs),
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
    #[command(about = "Serve the tool-call protocol on stdio for AI agents")]
    Mcp,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Board to use for this invocation instead of the current one
    #[arg(short, long, global = true)]
    board: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        let workspace = Workspace::load(cli.board)?;

        match cli.command {
            Commands::Init => init::cmd(&workspace),
            Commands::Add(args) => task::add(&workspace, args),
            Commands::List(args) => task::list(&workspace, args),
            Commands::View => task::view(&workspace),
            Commands::Get(args) => task::get(&workspace, args),
            Commands::Move(args) => task::move_task(&workspace, args),
            Commands::Update(args) => task::update(&workspace, args),
            Commands::Priority(args) => task::priority(&workspace, args),
            Commands::Delete(args) => task::delete(&workspace, args),
            Commands::Restore(args) => task::restore(&workspace, args),
            Commands::Link(args) => link::link(&workspace, args),
            Commands::Unlink(args) => link::unlink(&workspace, args),
            Commands::Links(args) => link::links(&workspace, args),
            Commands::Search(args) => task::search(&workspace, args),
            Commands::Board(args) => board::cmd(&workspace, args),
            Commands::Config(args) => config::cmd(workspace, args),
            Commands::Migrations(args) => migrations::cmd(&workspace, args),
            Commands::Mcp => mcp::cmd(workspace).await,
        }
    }
}

/// Application directory, configuration and the board chosen for this invocation.
pub struct Workspace {
    pub storage: DataStorage,
    pub config: Config,
    pub registry: BoardRegistry,
    pub board: String,
}

impl Workspace {
    pub fn load(board: Option<String>) -> Result<Self> {
        Self::load_from(DataStorage::new(), board)
    }

    pub fn load_from(storage: DataStorage, board: Option<String>) -> Result<Self> {
        let config = Config::read_from(&storage)?;
        let registry = BoardRegistry::new(storage.clone()).with_default_board(config.default_board.clone());

        let board = match board.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => registry.current_board()?,
        };
        msg_debug!(format!("Using board '{}' in {}", board, storage.base_path().display()));

        Ok(Self {
            storage,
            config,
            registry,
            board,
        })
    }

    /// Opens the board's store. Only the default board is created on demand.
    pub fn open(&self) -> Result<Db> {
        let path = self.registry.board_path(&self.board);
        if self.board != DEFAULT_BOARD && !path.exists() {
            msg_bail_anyhow!(Message::BoardNotFound(self.board.clone()));
        }
        Ok(Db::open(path)?)
    }
}
