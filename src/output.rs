use crate::error::ExternalCommandError;
use crate::shopify::CapturedOutput;
use crate::store::StoreRecord;
use owo_colors::{OwoColorize, Stream};
use std::path::Path;

pub fn PrintAdded(alias: &str) {
    println!(
        "Store {} added successfully",
        alias.if_supports_color(Stream::Stdout, |text| text.cyan())
    );
}

pub fn PrintStoreNotFound(alias: &str) {
    eprintln!(
        "{}",
        format!("Store with alias \"{alias}\" not found")
            .if_supports_color(Stream::Stderr, |text| text.red())
    );
}

pub fn PrintShopifyFailure(error: &ExternalCommandError) {
    eprintln!(
        "{}",
        format!("Error executing Shopify CLI command: {error}")
            .if_supports_color(Stream::Stderr, |text| text.red())
    );
}

pub fn PrintCaptured(output: &CapturedOutput) {
    print!("{}", output.stdout);

    if NeedsTrailingNewline(&output.stdout) {
        println!();
    }

    if !output.stderr.trim().is_empty() {
        eprint!("{}", output.stderr);
    }
}

fn NeedsTrailingNewline(stdout: &str) -> bool {
    !stdout.is_empty() && !stdout.ends_with('\n')
}

pub fn PrintWorkspace(path: &Path) {
    println!(
        "Workspace set to: {}",
        path.display()
            .if_supports_color(Stream::Stdout, |text| text.dimmed())
    );
}

pub fn PrintStores(stores: &[StoreRecord], workspace: Option<&Path>) {
    if stores.is_empty() {
        println!(
            "{}",
            "No stores configured.".if_supports_color(Stream::Stdout, |text| text.yellow())
        );
    }

    for store in stores {
        let alias = store.alias.if_supports_color(Stream::Stdout, |text| text.cyan());

        match store.projectDir.as_deref() {
            Some(dir) => println!(
                "{alias} → {} ({})",
                store.storeId,
                dir.if_supports_color(Stream::Stdout, |text| text.dimmed())
            ),
            None => println!("{alias} → {}", store.storeId),
        }
    }

    if let Some(path) = workspace {
        println!("\nWorkspace: {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn EmptyCapturedOutputPrintsNothingExtra() {
        assert!(!NeedsTrailingNewline(""));
        assert!(!NeedsTrailingNewline("Dawn [live]\n"));
        assert!(NeedsTrailingNewline("Dawn [live]"));
    }
}
