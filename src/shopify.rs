use crate::error::{ExternalCommandError, StmError};
use std::fmt;
use std::process::{Command, Stdio};

pub const SHOPIFY_PROGRAM: &str = "shopify";

pub const CD_HELPER_PROGRAM: &str = "stm-cd";

/// A program plus its arguments, passed to the OS without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn ToCommand(&self) -> Command {
        let mut command = Command::new(&self.program);

        command.args(&self.args);

        command
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;

        for arg in &self.args {
            write!(f, " {arg}")?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Seam between the command handlers and the processes they launch.
pub trait ExternalRunner {
    /// True when the program starts and exits successfully; all output discarded.
    fn Check(&self, invocation: &Invocation) -> bool;

    /// Runs to completion with stdout and stderr captured.
    fn Capture(&self, invocation: &Invocation) -> Result<CapturedOutput, ExternalCommandError>;

    /// Runs with inherited stdio and blocks until the child exits.
    fn Attach(&self, invocation: &Invocation) -> Result<(), ExternalCommandError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ExternalRunner for SystemRunner {
    fn Check(&self, invocation: &Invocation) -> bool {
        log::debug!("checking `{invocation}`");

        let status = invocation
            .ToCommand()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        matches!(status, Ok(status) if status.success())
    }

    fn Capture(&self, invocation: &Invocation) -> Result<CapturedOutput, ExternalCommandError> {
        log::debug!("running `{invocation}` (captured)");

        let output = invocation
            .ToCommand()
            .stdin(Stdio::inherit())
            .output()
            .map_err(|error| ExternalCommandError::Spawn {
                command: invocation.to_string(),
                error,
            })?;

        let captured = CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !output.status.success() {
            return Err(ExternalCommandError::Failed {
                command: invocation.to_string(),
                status: output.status,
                stderr: captured.stderr,
            });
        }

        Ok(captured)
    }

    fn Attach(&self, invocation: &Invocation) -> Result<(), ExternalCommandError> {
        log::debug!("running `{invocation}` (attached)");

        let status = invocation
            .ToCommand()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|error| ExternalCommandError::Spawn {
                command: invocation.to_string(),
                error,
            })?;

        if !status.success() {
            return Err(ExternalCommandError::Failed {
                command: invocation.to_string(),
                status,
                stderr: String::new(),
            });
        }

        Ok(())
    }
}

pub fn VersionCheck() -> Invocation {
    Invocation::new(SHOPIFY_PROGRAM, ["version"])
}

pub fn ThemeListInvocation(storeId: &str, name: Option<&str>) -> Invocation {
    let mut args = vec!["theme", "list", "--store", storeId];

    if let Some(name) = name {
        args.push("--name");
        args.push(name);
    }

    Invocation::new(SHOPIFY_PROGRAM, args)
}

pub fn ThemeDevInvocation(themeId: &str, port: Option<&str>) -> Invocation {
    let mut args = vec!["theme", "dev", "--theme", themeId];

    if let Some(port) = port {
        args.push("--port");
        args.push(port);
    }

    Invocation::new(SHOPIFY_PROGRAM, args)
}

pub fn CdHelperInvocation(alias: &str) -> Invocation {
    Invocation::new(CD_HELPER_PROGRAM, [alias])
}

pub fn EnsureShopifyCli(runner: &dyn ExternalRunner) -> Result<(), StmError> {
    if runner.Check(&VersionCheck()) {
        return Ok(());
    }

    Err(StmError::MissingShopifyCli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ThemeListWithNameRendersExactCommand() {
        let invocation = ThemeListInvocation("S1", Some("foo"));

        assert_eq!(invocation.to_string(), "shopify theme list --store S1 --name foo");
    }

    #[test]
    fn ThemeListWithoutNameOmitsFlag() {
        let invocation = ThemeListInvocation("S1", None);

        assert_eq!(invocation.program, "shopify");
        assert_eq!(invocation.args, vec!["theme", "list", "--store", "S1"]);
    }

    #[test]
    fn ThemeDevAppendsPortWhenGiven() {
        assert_eq!(
            ThemeDevInvocation("123", None).to_string(),
            "shopify theme dev --theme 123"
        );
        assert_eq!(
            ThemeDevInvocation("123", Some("9393")).to_string(),
            "shopify theme dev --theme 123 --port 9393"
        );
    }

    #[test]
    fn CdHelperPassesAliasAsSoleArgument() {
        let invocation = CdHelperInvocation("main-shop");

        assert_eq!(invocation.program, "stm-cd");
        assert_eq!(invocation.args, vec!["main-shop"]);
    }

    #[test]
    fn MissingProgramIsSpawnError() {
        let invocation = Invocation::new("stm-definitely-not-installed", ["x"]);

        let runner = SystemRunner;

        assert!(!runner.Check(&invocation));
        assert!(matches!(
            runner.Capture(&invocation),
            Err(ExternalCommandError::Spawn { .. })
        ));
        assert!(matches!(
            runner.Attach(&invocation),
            Err(ExternalCommandError::Spawn { .. })
        ));
    }

    #[test]
    fn MissingCliErrorCarriesInstallHint() {
        let message = StmError::MissingShopifyCli.to_string();

        let lines: Vec<&str> = message.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Shopify CLI is not installed. Please install it first:",
                "npm install -g @shopify/cli @shopify/theme",
            ]
        );
    }
}
