use crate::cli::{CliArgs, Commands, StoreCommands};
use crate::error::{ExternalCommandError, StmError};
use crate::output;
use crate::paths::ConfigPaths;
use crate::prompts::{self, Answers, LinePrompter, PromptSpec, Prompter, TerminalPrompter};
use crate::shopify::{self, ExternalRunner, SystemRunner};
use crate::store::Store;
use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

const ADD_PROMPTS: [PromptSpec; 3] = [
    PromptSpec {
        key: "storeId",
        message: "Enter the Shopify store ID:",
        required: true,
        invalidMessage: "Store ID is required",
        default: prompts::NoDefault,
    },
    PromptSpec {
        key: "alias",
        message: "Enter an alias for the store (optional):",
        required: false,
        invalidMessage: "",
        default: AliasDefault,
    },
    PromptSpec {
        key: "projectDir",
        message: "Enter the project directory path:",
        required: true,
        invalidMessage: "Project directory is required",
        default: ProjectDirDefault,
    },
];

fn AliasDefault(answers: &Answers) -> Option<String> {
    answers.get("storeId").cloned()
}

fn ProjectDirDefault(_: &Answers) -> Option<String> {
    env::current_dir()
        .ok()
        .map(|dir| dir.to_string_lossy().into_owned())
}

pub fn Execute(args: CliArgs) -> Result<()> {
    if args.noColor || env::var_os("NO_COLOR").is_some() {
        owo_colors::set_override(false);
    }

    match args.command {
        Commands::Completions(completions) => {
            GenerateCompletions(completions.shell);
            Ok(())
        }
        Commands::Store(command) => {
            let paths = ConfigPaths::Resolve()?;

            let mut store = Store::Load(paths)?;

            Dispatch(command, &mut store, &SystemRunner)
        }
    }
}

pub fn Dispatch(command: StoreCommands, store: &mut Store, runner: &dyn ExternalRunner) -> Result<()> {
    match command {
        StoreCommands::Add => {
            if io::stdin().is_terminal() {
                Add(store, &mut TerminalPrompter)
            } else {
                let mut prompter = LinePrompter::new(io::stdin().lock(), io::stdout());
                Add(store, &mut prompter)
            }
        }
        StoreCommands::List(list) => List(store, runner, &list.alias, list.name.as_deref()),
        StoreCommands::Dev(dev) => Dev(runner, &dev.themeId, dev.port.as_deref()),
        StoreCommands::SetWorkspace(workspace) => SetWorkspace(store, workspace.directory),
        StoreCommands::Cd(cd) => Cd(runner, &cd.alias),
        StoreCommands::Stores => {
            output::PrintStores(store.ListStores(), store.GetWorkspace());
            Ok(())
        }
    }
}

pub fn Add(store: &mut Store, prompter: &mut dyn Prompter) -> Result<()> {
    let mut answers = prompts::AskAll(prompter, &ADD_PROMPTS)?;

    let storeId = answers.remove("storeId").unwrap_or_default();
    let alias = answers.remove("alias").unwrap_or_else(|| storeId.clone());
    let projectDir = answers.remove("projectDir").filter(|dir| !dir.is_empty());

    store.AddStore(&storeId, &alias, projectDir.as_deref())?;

    output::PrintAdded(&alias);

    Ok(())
}

pub fn List(
    store: &Store,
    runner: &dyn ExternalRunner,
    alias: &str,
    name: Option<&str>,
) -> Result<()> {
    shopify::EnsureShopifyCli(runner)?;

    let Some(record) = store.GetStore(alias) else {
        output::PrintStoreNotFound(alias);
        return Ok(());
    };

    let invocation = shopify::ThemeListInvocation(&record.storeId, name);

    match runner.Capture(&invocation) {
        Ok(captured) => output::PrintCaptured(&captured),
        Err(error) => output::PrintShopifyFailure(&error),
    }

    Ok(())
}

pub fn Dev(runner: &dyn ExternalRunner, themeId: &str, port: Option<&str>) -> Result<()> {
    shopify::EnsureShopifyCli(runner)?;

    let invocation = shopify::ThemeDevInvocation(themeId, port);

    match runner.Attach(&invocation) {
        Ok(()) => {}
        Err(error @ ExternalCommandError::Spawn { .. }) => output::PrintShopifyFailure(&error),
        Err(error) => log::warn!("{error}"),
    }

    Ok(())
}

pub fn SetWorkspace(store: &mut Store, directory: Option<PathBuf>) -> Result<()> {
    let target = match directory {
        Some(dir) => dir,
        None => env::current_dir().context("Failed to read the current directory")?,
    };

    store.SetWorkspace(&target)?;

    if let Some(resolved) = store.GetWorkspace() {
        output::PrintWorkspace(resolved);
    }

    Ok(())
}

pub fn Cd(runner: &dyn ExternalRunner, alias: &str) -> Result<()> {
    let invocation = shopify::CdHelperInvocation(alias);

    match runner.Attach(&invocation) {
        Ok(()) => Ok(()),
        Err(error @ ExternalCommandError::Spawn { .. }) => Err(StmError::HelperSpawn(error).into()),
        Err(error) => {
            log::warn!("{error}");
            Ok(())
        }
    }
}

fn GenerateCompletions(shell: Shell) {
    let mut cmd = CliArgs::command();

    generate(shell, &mut cmd, "stm", &mut io::stdout());
}
