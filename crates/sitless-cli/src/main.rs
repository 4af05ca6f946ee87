use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod autostart;
mod commands;
mod display;

#[derive(Parser)]
#[command(name = "sitless", version, about = "Sitless -- sitting time reminder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reminder loop in the foreground
    Run(commands::run::RunArgs),
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Micro-break task catalog
    Tasks {
        #[command(subcommand)]
        action: commands::tasks::TasksAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Tasks { action } => commands::tasks::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
