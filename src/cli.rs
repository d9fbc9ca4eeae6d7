use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "stm",
    about = "Shopify Theme Manager - manage store aliases and run Shopify theme commands",
    version,
    disable_help_subcommand = true
)]
pub struct CliArgs {
    #[arg(long = "no-color", global = true, action = ArgAction::SetTrue, help = "Disable colored output.")]
    pub noColor: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Store(StoreCommands),

    #[command(about = "Generate shell completions to stdout")]
    Completions(CompletionsArgs),
}

/// Subcommands that work against the loaded store registry.
#[derive(Subcommand, Debug)]
pub enum StoreCommands {
    #[command(about = "Add a new Shopify store configuration")]
    Add,

    #[command(about = "List themes for a store")]
    List(ListArgs),

    #[command(about = "Start theme development server")]
    Dev(DevArgs),

    #[command(about = "Set the workspace directory for all projects")]
    SetWorkspace(SetWorkspaceArgs),

    #[command(about = "Change to a store's project directory (runs stm-cd)")]
    Cd(CdArgs),

    #[command(about = "Show every saved store alias")]
    Stores,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(value_name = "ALIAS", help = "Store alias")]
    pub alias: String,

    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help = "Filter by theme name"
    )]
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct DevArgs {
    #[arg(value_name = "THEME_ID", help = "Theme ID to develop against")]
    pub themeId: String,

    #[arg(long = "port", value_name = "PORT", help = "Port for the local development server")]
    pub port: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetWorkspaceArgs {
    #[arg(value_name = "DIRECTORY", help = "Workspace directory (defaults to the current directory)")]
    pub directory: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CdArgs {
    #[arg(value_name = "ALIAS", help = "Store alias")]
    pub alias: String,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    #[arg(value_enum, value_name = "SHELL")]
    pub shell: Shell,
}

pub fn ParseArgs() -> Result<CliArgs> {
    let args = CliArgs::parse();

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn CommandDefinitionIsValid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn ListAcceptsNameFlag() {
        let args = CliArgs::try_parse_from(["stm", "list", "A1", "--name", "foo"]).unwrap();

        match args.command {
            Commands::Store(StoreCommands::List(list)) => {
                assert_eq!(list.alias, "A1");
                assert_eq!(list.name.as_deref(), Some("foo"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn SetWorkspaceDirectoryIsOptional() {
        let args = CliArgs::try_parse_from(["stm", "set-workspace"]).unwrap();

        assert!(matches!(
            args.command,
            Commands::Store(StoreCommands::SetWorkspace(SetWorkspaceArgs { directory: None }))
        ));
    }

    #[test]
    fn CompletionsStayOutsideStoreCommands() {
        let args = CliArgs::try_parse_from(["stm", "completions", "bash"]).unwrap();

        assert!(matches!(args.command, Commands::Completions(_)));

        let args = CliArgs::try_parse_from(["stm", "stores"]).unwrap();

        assert!(matches!(args.command, Commands::Store(StoreCommands::Stores)));
    }

    #[test]
    fn CdRequiresAlias() {
        assert!(CliArgs::try_parse_from(["stm", "cd"]).is_err());
        assert!(CliArgs::try_parse_from(["stm", "cd", "a", "b"]).is_err());
    }
}
