#![allow(non_snake_case)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod paths;
pub mod prompts;
pub mod shopify;
pub mod store;

use anyhow::Result;

pub fn Run() -> Result<()> {

    let cli = cli::ParseArgs()?;

    commands::Execute(cli)
}

/// Routes `log` records to stderr; `RUST_LOG` overrides the default `warn` level.
pub fn InitLogging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}
