mod cli;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::from_path("config/.env");
    let _ = dotenvy::dotenv();

    let args = cli::Cli::parse();
    cli::logging::init(&args.log_level, args.log_format);

    match cli::run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "fatal error");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
