use anyhow::Result;
use benchbox::cli::{run, stack};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "benchbox",
    about = "Controller for the agent assessment stack"
)]
struct Cli {
    /// Directory holding benchbox.toml and the compose file (default: current dir)
    #[arg(long, env = "BENCHBOX_CONFIG_DIR", default_value = ".")]
    config_dir: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full build / boot / probe / bench / teardown workflow
    Run(run::RunOptions),
    /// Drive individual stack operations (build, up, down, status, logs)
    Stack(stack::StackCommand),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(options) => run::run(options, &cli.config_dir),
        Commands::Stack(cmd) => stack::run(cmd, &cli.config_dir),
    }
}
