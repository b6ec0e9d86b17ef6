mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "recval")]
#[command(version, about = "Record validation engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate data records against a record schema
    Validate {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: String,

        /// Path to the data file (a single object or an array of objects)
        data: String,

        /// Report every violation instead of only the first one
        #[arg(short, long)]
        all: bool,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check a record schema without validating data
    Check {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    // Logs go to stderr so JSON output on stdout stays parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::Validate {
            schema,
            data,
            all,
            format,
        } => commands::validate::execute(&schema, &data, all, &format),

        Commands::Check { schema, format } => commands::check::execute(&schema, &format),
    }
}
