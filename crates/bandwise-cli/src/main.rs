//! bandwise CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bandwise", version, about = "Adaptive proficiency testing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive test, reading answers from stdin
    Run {
        /// Examinee name recorded on every response
        #[arg(long)]
        name: Option<String>,

        /// Starting level (A1..C2 or 0..5); random if omitted
        #[arg(long)]
        initial_band: Option<String>,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, all
        #[arg(long, default_value = "all")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Replay a scripted answer sequence (e.g. "YYNYY")
    Simulate {
        /// Answers: Y/1 for correct, N/0 for incorrect
        #[arg(long)]
        answers: String,

        /// Starting level (A1..C2 or 0..5); random if omitted
        #[arg(long)]
        initial_band: Option<String>,

        /// Examinee name recorded on every response
        #[arg(long)]
        name: Option<String>,

        /// Quit at the first checkpoint with a high-confidence advisory
        #[arg(long)]
        quit_on_high: bool,

        /// Write reports to this directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render a saved JSON session report as HTML
    Render {
        /// Session report JSON
        #[arg(long)]
        report: PathBuf,

        /// HTML file to write
        #[arg(long)]
        output: PathBuf,
    },

    /// Print the difficulty table
    Table,

    /// Create a starter config
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bandwise=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            name,
            initial_band,
            output,
            format,
            config,
        } => commands::run::execute(name, initial_band, output, format, config),
        Commands::Simulate {
            answers,
            initial_band,
            name,
            quit_on_high,
            output,
            format,
            config,
        } => commands::simulate::execute(
            answers,
            initial_band,
            name,
            quit_on_high,
            output,
            format,
            config,
        ),
        Commands::Render { report, output } => commands::render::execute(report, output),
        Commands::Table => commands::table::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
