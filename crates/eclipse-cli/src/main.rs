use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "eclipse", version, about = "Eclipse focus and progression CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cognitive-load task scheduling
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Today's task pool
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// XP, level and rank
    Progress {
        #[command(subcommand)]
        action: commands::progress::ProgressAction,
    },
    /// Story chapters and choices
    Story {
        #[command(subcommand)]
        action: commands::story::StoryAction,
    },
    /// Focus session analytics
    Analytics {
        #[command(subcommand)]
        action: commands::analytics::AnalyticsAction,
    },
    /// Energy usage analytics
    Energy {
        #[command(subcommand)]
        action: commands::energy::EnergyAction,
    },
    /// Focus presence
    Presence {
        #[command(subcommand)]
        action: commands::presence::PresenceAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("ECLIPSE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Progress { action } => commands::progress::run(action),
        Commands::Story { action } => commands::story::run(action),
        Commands::Analytics { action } => commands::analytics::run(action),
        Commands::Energy { action } => commands::energy::run(action),
        Commands::Presence { action } => commands::presence::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
