use std::process::ExitCode;

fn main() -> ExitCode {
    shopify_theme_manager::InitLogging();

    match shopify_theme_manager::Run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
