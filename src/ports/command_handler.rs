use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entry::EntryKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("failed to start")]
    Startup,
    #[error("setup failed")]
    Setup,
    #[error("failed to record the {0} time")]
    Update(EntryKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Setup { sheet_url: String, secret: PathBuf },
    Update(EntryKind),
}

#[async_trait::async_trait]
pub trait CommandHandler: Send + Sync {
    /// Runs `command`, returning whatever should be printed on success.
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError>;
}
