//! `cainban init`: creates (or upgrades) the store of the selected board.

use super::Workspace;
use crate::{
    db::db::Db,
    libs::{board::DEFAULT_BOARD, messages::Message},
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;

pub fn cmd(workspace: &Workspace) -> Result<()> {
    let path = workspace.registry.board_path(&workspace.board);
    if workspace.board != DEFAULT_BOARD && !path.exists() {
        msg_bail_anyhow!(Message::BoardNotFound(workspace.board.clone()));
    }

    Db::open(&path)?;
    msg_success!(Message::DatabaseInitialized(path.display().to_string()));
    Ok(())
}
