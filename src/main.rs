use clap::Parser;
use oncorisk::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli::load_config(cli.model)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => cli::serve::run(config).await,
        Command::Predict(args) => cli::predict::run(config, args),
        Command::Inspect => cli::inspect::run(config),
    }
}
