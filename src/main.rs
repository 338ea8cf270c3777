use clap::Parser;

use bugdrop::cli::{self, Cli};
use bugdrop::logging;

#[tokio::main]
async fn main() {
    if let Err(e) = logging::init() {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let cli = Cli::parse();

    let exit_code = match cli::run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e.user_message());
            if let Some(action) = e.suggested_action() {
                eprintln!("Hint: {}", action);
            }
            1
        }
    };

    logging::shutdown();
    std::process::exit(exit_code);
}
