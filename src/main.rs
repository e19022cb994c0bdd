use std::process::ExitCode;

use colored::Colorize;
use json_shape::cli::CommandLineInterface;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let command_line_interface = CommandLineInterface::load();

    // logs go to stderr so stdout stays a clean schema document
    let level = if command_line_interface.quiet { tracing::Level::WARN } else { tracing::Level::INFO };
    // `RUST_LOG` wins over the default level when set
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match command_line_interface.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
