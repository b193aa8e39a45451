//! knop CLI: vocabulary and knowledge quizzes from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod prompter;

#[derive(Parser)]
#[command(
    name = "knop",
    version,
    about = "Vocabulary and knowledge quiz trainer"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database path (overrides config)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show library counts
    Stats,

    /// Replace the library with a deck
    Seed {
        /// Deck TOML file (default: configured deck or built-in sample)
        #[arg(long)]
        deck: Option<PathBuf>,
    },

    /// Run a quiz session
    Quiz {
        /// Number of questions
        #[arg(long, short = 'n')]
        count: Option<usize>,

        /// Write the session report as JSON
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Create starter config and deck
    Init,

    /// Interactive menu (default)
    Menu,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("knop=warn".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Stats => commands::stats::execute(config, cli.database),
        Commands::Seed { deck } => commands::seed::execute(config, cli.database, deck),
        Commands::Quiz { count, save } => {
            commands::quiz::execute(config, cli.database, count, save)
        }
        Commands::Init => commands::init::execute(),
        Commands::Menu => commands::menu::execute(config, cli.database),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
