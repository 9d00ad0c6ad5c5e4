//! lexdrill CLI: the user-facing command-line interface.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "lexdrill", version, about = "Adaptive vocabulary drill")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive drill session
    Quiz {
        /// Vocabulary level (defaults to the configured level)
        #[arg(long)]
        level: Option<u32>,

        /// Show the written form and answer with the translation
        #[arg(long)]
        reverse: bool,

        /// Walk the list in order instead of by weight
        #[arg(long)]
        sequential: bool,

        /// Hide romanization on cards
        #[arg(long)]
        no_romanization: bool,

        /// Hide the written form on translation cards
        #[arg(long)]
        no_written_form: bool,

        /// Hide per-word statistics after each answer
        #[arg(long)]
        no_metadata: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show overall progress for a level
    Stats {
        /// Vocabulary level (defaults to the configured level)
        #[arg(long)]
        level: Option<u32>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a vocabulary file for problems
    Validate {
        /// Vocabulary level to check
        #[arg(long, conflicts_with = "file")]
        level: Option<u32>,

        /// Vocabulary file to check
        #[arg(long)]
        file: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Delete the stored progress of a level
    Reset {
        /// Vocabulary level (defaults to the configured level)
        #[arg(long)]
        level: Option<u32>,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and sample vocabulary
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lexdrill=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quiz {
            level,
            reverse,
            sequential,
            no_romanization,
            no_written_form,
            no_metadata,
            config,
        } => {
            let options = commands::quiz::QuizOptions {
                level,
                reverse,
                sequential,
                no_romanization,
                no_written_form,
                no_metadata,
            };
            commands::quiz::execute(options, config).await
        }
        Commands::Stats {
            level,
            format,
            config,
        } => commands::stats::execute(level, format, config),
        Commands::Validate {
            level,
            file,
            config,
        } => commands::validate::execute(level, file, config),
        Commands::Reset { level, yes, config } => commands::reset::execute(level, yes, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
