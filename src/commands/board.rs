use super::Workspace;
use crate::{
    libs::{
        board::{detect_project_board, DEFAULT_BOARD},
        messages::Message,
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::env;

#[derive(Debug, Args)]
pub struct BoardArgs {
    #[command(subcommand)]
    command: Option<BoardCommand>,
}

#[derive(Debug, Subcommand)]
enum BoardCommand {
    /// List boards (the current one is marked with *)
    List,
    /// Create a board
    Create {
        name: String,
        /// Optional description (remaining words)
        description: Vec<String>,
    },
    /// Make a board current
    Switch { name: String },
    /// Delete a board and all of its tasks
    Delete {
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the current board
    Current,
    /// Suggest a board name for the working directory
    Detect {
        /// Create the detected board if needed and switch to it
        #[arg(short, long)]
        switch: bool,
    },
}

pub fn cmd(workspace: &Workspace, args: BoardArgs) -> Result<()> {
    match args.command {
        Some(BoardCommand::List) | None => handle_list(workspace),
        Some(BoardCommand::Create { name, description }) => handle_create(workspace, &name, &description.join(" ")),
        Some(BoardCommand::Switch { name }) => handle_switch(workspace, &name),
        Some(BoardCommand::Delete { name, yes }) => handle_delete(workspace, &name, yes),
        Some(BoardCommand::Current) => {
            msg_print!(Message::CurrentBoard(workspace.board.clone()));
            Ok(())
        }
        Some(BoardCommand::Detect { switch }) => handle_detect(workspace, switch),
    }
}

fn handle_list(workspace: &Workspace) -> Result<()> {
    let boards = workspace.registry.list_boards()?;
    if boards.is_empty() {
        msg_info!(Message::NoBoards);
        return Ok(());
    }

    View::boards(&boards, &workspace.board);
    Ok(())
}

fn handle_create(workspace: &Workspace, name: &str, description: &str) -> Result<()> {
    let board = workspace.registry.create_board(name, description)?;
    msg_success!(Message::BoardCreated(board.name));
    Ok(())
}

fn handle_switch(workspace: &Workspace, name: &str) -> Result<()> {
    let name = name.trim();
    if name != DEFAULT_BOARD && !workspace.registry.exists(name) {
        msg_bail_anyhow!(Message::BoardNotFound(name.to_string()));
    }

    let stored = workspace.registry.set_current_board(name)?;
    msg_success!(Message::BoardSwitched(stored));
    Ok(())
}

fn handle_delete(workspace: &Workspace, name: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteBoard(name.to_string()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_warning!(Message::BoardDeleteCancelled);
            return Ok(());
        }
    }

    workspace.registry.delete_board(name)?;
    msg_success!(Message::BoardDeleted(name.to_string()));
    Ok(())
}

fn handle_detect(workspace: &Workspace, switch: bool) -> Result<()> {
    let name = detect_project_board(&env::current_dir()?);
    msg_print!(Message::DetectedBoard(name.clone()));

    if switch {
        if name != DEFAULT_BOARD && !workspace.registry.exists(&name) {
            workspace.registry.create_board(&name, "")?;
            msg_success!(Message::BoardCreated(name.clone()));
        }
        let stored = workspace.registry.set_current_board(&name)?;
        msg_success!(Message::BoardSwitched(stored));
    }
    Ok(())
}
