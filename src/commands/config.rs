use super::Workspace;
use crate::{
    libs::{config::CONFIG_FILE_NAME, messages::Message},
    msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Show the configuration
    Show,
    /// Set a key: default_board, default_priority or confirm_hard_delete
    Set { key: String, value: String },
}

pub fn cmd(workspace: Workspace, args: ConfigArgs) -> Result<()> {
    let Workspace { storage, mut config, .. } = workspace;

    match args.command {
        Some(ConfigCommand::Show) | None => {
            let path = storage.base_path().join(CONFIG_FILE_NAME);
            msg_print!(Message::ConfigHeader(path.display().to_string()));
            msg_print!(serde_json::to_string_pretty(&config)?);
        }
        Some(ConfigCommand::Set { key, value }) => {
            config.set(&key, &value)?;
            config.save_to(&storage)?;
            msg_success!(Message::ConfigValueSet { key, value });
        }
    }

    Ok(())
}
