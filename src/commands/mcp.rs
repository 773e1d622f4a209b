use super::Workspace;
use crate::{
    libs::messages::Message,
    mcp::{self, McpServer, ToolServer},
};
use anyhow::Result;

/// Runs the stdio tool server on the selected board until stdin closes.
pub async fn cmd(workspace: Workspace) -> Result<()> {
    let db = workspace.open()?;
    // Stdout is the protocol channel; the banner goes to the log only.
    tracing::info!("{}", Message::McpServerStarting(workspace.board.clone()));

    let Workspace { registry, board, .. } = workspace;
    mcp::run(McpServer::new(ToolServer::new(registry, board, db))).await
}
