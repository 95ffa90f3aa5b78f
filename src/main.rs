//! LipidAI - Main Entry Point
//!
//! Train, serve and query the LDL-C regression model.

use clap::Parser;
use lipidai::cli::{cmd_info, cmd_predict, cmd_serve, cmd_train, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout carries the command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lipidai=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train { data, output, separator, units } => {
            // Fitting is CPU-bound; keep it off the async workers
            tokio::task::spawn_blocking(move || cmd_train(&data, &output, separator, units))
                .await??;
        }
        Commands::Serve { host, port, model } => {
            cmd_serve(host, port, model).await?;
        }
        Commands::Predict { model, tc, hdl_c, tg } => {
            cmd_predict(&model, tc, hdl_c, tg)?;
        }
        Commands::Info { data, separator } => {
            cmd_info(&data, separator)?;
        }
    }

    Ok(())
}
