use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Failure of a single external program invocation.
#[derive(Error, Debug)]
pub enum ExternalCommandError {
    #[error("failed to start `{command}`: {error}")]
    Spawn { command: String, error: io::Error },

    #[error("`{command}` exited with {status}{}", FormatStderr(.stderr))]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Conditions that end the process with exit code 1.
#[derive(Error, Debug)]
pub enum StmError {
    #[error("Shopify CLI is not installed. Please install it first:\nnpm install -g @shopify/cli @shopify/theme")]
    MissingShopifyCli,

    #[error("Failed to execute stm-cd: {0}")]
    HelperSpawn(ExternalCommandError),
}

fn FormatStderr(stderr: &str) -> String {
    let trimmed = stderr.trim();

    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}
