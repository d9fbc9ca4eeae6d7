use anyhow::{Result, bail};
use dialoguer::Input;
use owo_colors::{OwoColorize, Stream};
use std::collections::HashMap;
use std::io::{BufRead, Write};

pub type Answers = HashMap<&'static str, String>;

pub type DefaultFn = fn(&Answers) -> Option<String>;

/// One question of an interactive form. `default` sees every answer given
/// before it.
#[derive(Clone, Copy)]
pub struct PromptSpec {
    pub key: &'static str,
    pub message: &'static str,
    pub required: bool,
    pub invalidMessage: &'static str,
    pub default: DefaultFn,
}

pub fn NoDefault(_: &Answers) -> Option<String> {
    None
}

pub trait Prompter {
    /// Returns the raw input, possibly blank. `Ok(None)` means input ended.
    fn Ask(&mut self, spec: &PromptSpec, default: Option<&str>) -> Result<Option<String>>;

    fn Reject(&mut self, message: &str) -> Result<()>;
}

/// Asks every question in order, applying defaults and re-asking required
/// questions until they receive a non-blank answer.
pub fn AskAll(prompter: &mut dyn Prompter, specs: &[PromptSpec]) -> Result<Answers> {
    let mut answers = Answers::new();

    for spec in specs {
        let default = (spec.default)(&answers);

        let value = loop {
            let raw = prompter.Ask(spec, default.as_deref())?;

            let Some(raw) = raw else {
                if let Some(value) = default.clone() {
                    break value;
                }

                if spec.required {
                    bail!("{} (input ended)", spec.invalidMessage);
                }

                break String::new();
            };

            let trimmed = raw.trim();

            if !trimmed.is_empty() {
                break trimmed.to_string();
            }

            if let Some(value) = default.clone() {
                break value;
            }

            if spec.required {
                prompter.Reject(spec.invalidMessage)?;
                continue;
            }

            break String::new();
        };

        answers.insert(spec.key, value);
    }

    Ok(answers)
}

fn CheckRequired(
    value: &str,
    required: bool,
    invalidMessage: &'static str,
) -> std::result::Result<(), &'static str> {
    if required && value.trim().is_empty() {
        Err(invalidMessage)
    } else {
        Ok(())
    }
}

/// Interactive prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn Ask(&mut self, spec: &PromptSpec, default: Option<&str>) -> Result<Option<String>> {
        let required = spec.required && default.is_none();
        let invalidMessage = spec.invalidMessage;

        // Empty lines must reach the validator so the rejection message shows.
        let mut input = Input::<String>::new()
            .with_prompt(spec.message.trim_end_matches(':'))
            .allow_empty(true)
            .validate_with(move |value: &String| CheckRequired(value, required, invalidMessage));

        if let Some(value) = default {
            input = input.default(value.to_string());
        }

        Ok(Some(input.interact_text()?))
    }

    fn Reject(&mut self, message: &str) -> Result<()> {
        eprintln!(
            "{}",
            message.if_supports_color(Stream::Stderr, |text| text.red())
        );

        Ok(())
    }
}

/// Line-oriented prompts for piped input.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn Ask(&mut self, spec: &PromptSpec, default: Option<&str>) -> Result<Option<String>> {
        match default {
            Some(value) => write!(self.writer, "{} ({value}) ", spec.message)?,
            None => write!(self.writer, "{} ", spec.message)?,
        }

        self.writer.flush()?;

        let mut line = String::new();

        if self.reader.read_line(&mut line)? == 0 {
            writeln!(self.writer)?;
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn Reject(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{message}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn StoreIdDefault(answers: &Answers) -> Option<String> {
        answers.get("storeId").cloned()
    }

    fn FixedDirDefault(_: &Answers) -> Option<String> {
        Some("/work/shop".to_string())
    }

    const SPECS: [PromptSpec; 3] = [
        PromptSpec {
            key: "storeId",
            message: "Enter the Shopify store ID:",
            required: true,
            invalidMessage: "Store ID is required",
            default: NoDefault,
        },
        PromptSpec {
            key: "alias",
            message: "Enter an alias for the store (optional):",
            required: false,
            invalidMessage: "",
            default: StoreIdDefault,
        },
        PromptSpec {
            key: "projectDir",
            message: "Enter the project directory path:",
            required: true,
            invalidMessage: "Project directory is required",
            default: FixedDirDefault,
        },
    ];

    fn Run(input: &str) -> (Result<Answers>, String) {
        let mut output = Vec::new();

        let result = {
            let mut prompter = LinePrompter::new(Cursor::new(input.as_bytes()), &mut output);
            AskAll(&mut prompter, &SPECS)
        };

        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn ExplicitAnswersAreKept() {
        let (answers, _) = Run("S1\nA1\n/tmp/p\n");

        let answers = answers.unwrap();

        assert_eq!(answers["storeId"], "S1");
        assert_eq!(answers["alias"], "A1");
        assert_eq!(answers["projectDir"], "/tmp/p");
    }

    #[test]
    fn BlankAnswersTakeDefaultsFromPriorAnswers() {
        let (answers, output) = Run("my-shop\n\n\n");

        let answers = answers.unwrap();

        assert_eq!(answers["alias"], "my-shop");
        assert_eq!(answers["projectDir"], "/work/shop");
        assert!(output.contains("Enter an alias for the store (optional): (my-shop)"));
    }

    #[test]
    fn BlankRequiredAnswerIsAskedAgain() {
        let (answers, output) = Run("   \n\nS1\n\n\n");

        let answers = answers.unwrap();

        assert_eq!(answers["storeId"], "S1");
        assert_eq!(output.matches("Store ID is required").count(), 2);
    }

    #[test]
    fn EndOfInputFallsBackToDefaults() {
        let (answers, _) = Run("S1\n");

        let answers = answers.unwrap();

        assert_eq!(answers["alias"], "S1");
        assert_eq!(answers["projectDir"], "/work/shop");
    }

    #[test]
    fn EndOfInputWithoutRequiredAnswerFails() {
        let (answers, _) = Run("");

        let error = answers.unwrap_err();

        assert!(error.to_string().contains("Store ID is required"));
    }

    #[test]
    fn TerminalValidatorRejectsEmptyAndBlankInput() {
        assert_eq!(CheckRequired("", true, "Store ID is required"), Err("Store ID is required"));
        assert_eq!(CheckRequired("   ", true, "Store ID is required"), Err("Store ID is required"));
        assert_eq!(CheckRequired("S1", true, "Store ID is required"), Ok(()));
        assert_eq!(CheckRequired("", false, ""), Ok(()));
    }
}
