mod commands;

use anyhow::Result;
use authform_validation::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "authform")]
#[command(version, about = "authform CLI - check form fields against the validation rules", long_about = None)]
struct Cli {
    /// Config file (defaults to ./authform.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single field
    Field {
        /// Field name (constraints are derived from it)
        #[arg(short, long)]
        name: String,

        /// Field value (empty if omitted)
        #[arg(long, default_value = "")]
        value: String,

        /// Treat the field as carrying the `required` attribute
        #[arg(short, long)]
        required: bool,

        /// Explicit constraint tags, replacing the ones derived from the name
        #[arg(long = "constraint", value_name = "TAG")]
        constraints: Vec<String>,

        /// Primary password value, for confirmation fields
        #[arg(long)]
        related: Option<String>,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate every field of a form fixture (JSON)
    Form {
        /// Path to the fixture
        path: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    }
}

fn run(cli: Cli) -> Result<bool> {
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Field {
            name,
            value,
            required,
            constraints,
            related,
            json,
        } => commands::field::execute(
            &config,
            commands::field::FieldArgs {
                name,
                value,
                required,
                constraints,
                related,
            },
            json,
        ),
        Commands::Form { path, json } => commands::form::execute(&config, &path, json),
    }
}

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
