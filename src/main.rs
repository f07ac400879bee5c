use clap::Parser;
use std::process::ExitCode;

use helpdesk::cli::Cli;
use helpdesk::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging failures are ignored.
    let _ = logging::init();

    let result = cli.run().await;

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
