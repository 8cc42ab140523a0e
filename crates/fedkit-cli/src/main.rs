//! fedkit CLI entrypoint.

use clap::Parser;

mod commands;
mod handlers;
mod output;


use commands::Commands;

#[derive(Parser)]
#[command(name = "fedkit")]
#[command(author, version, about = "OIDC federation bootstrap for CI/CD pipelines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bootstrap(args) => handlers::bootstrap(args).await?,
        Commands::Show { json, config } => handlers::show(json, &config).await?,
        Commands::Providers => handlers::providers().await?,
    }

    Ok(())
}
