mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dagrid",
    version,
    about = "Extract development applications from ruled register tables"
)]
struct Cli {
    /// Log pipeline decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract application records from a decoded page dump
    Extract {
        /// Path to the JSON page dump
        input_file: PathBuf,

        /// Directory holding street_names.csv, street_suffixes.csv and suburb_names.csv
        #[arg(short, long, value_name = "DIR")]
        gazetteer: PathBuf,

        /// JSON options file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// URL where the source document can be viewed
        #[arg(long, value_name = "URL")]
        info_url: Option<String>,

        /// URL or mailto: address for public comments
        #[arg(long, value_name = "URL")]
        comment_url: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write records and diagnostics to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the reconstructed table rows of each page
    Grid {
        /// Path to the JSON page dump
        input_file: PathBuf,
    },
    /// Normalize one street and suburb against the gazetteer
    Address {
        /// Street text, e.g. "22 SMYTH RD"
        street: String,

        /// Suburb text, e.g. "TOWNSVILLE"
        suburb: String,

        /// Directory holding the gazetteer datasets
        #[arg(short, long, value_name = "DIR")]
        gazetteer: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "dagrid_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            input_file,
            gazetteer,
            config,
            info_url,
            comment_url,
            output,
            out,
        } => commands::extract::run(commands::extract::ExtractArgs {
            input_file,
            gazetteer_dir: gazetteer,
            config,
            info_url,
            comment_url,
            output_format: output,
            output_file: out,
        }),
        Commands::Grid { input_file } => commands::grid::run(&input_file),
        Commands::Address {
            street,
            suburb,
            gazetteer,
        } => commands::address::run(&street, &suburb, &gazetteer),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
