mod localize;
mod show;

use std::{path::PathBuf, process, str::FromStr};

use clap::{Parser, Subcommand};
use sheetloc::{Platform, config::DEFAULT_CONFIG_FILE_NAME};

use crate::{
    localize::{RunOptions, run_check_command, run_localize_command},
    show::{ShowOptions, run_show_command},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE_NAME, global = true)]
    config: PathBuf,

    /// Only process this product of the configuration
    #[arg(short, long, global = true)]
    product: Option<String>,

    /// Print progress diagnostics (RUST_LOG is honoured as well)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate strings.xml files from the translation sheet.
    Localize,

    /// Fail if the checked-in strings.xml files differ from the translation sheet.
    Check,

    /// Print the values of one language as they would be generated.
    Show {
        /// Language column title to show
        #[arg(short, long)]
        language: String,

        /// Platform whose identifiers are used (android, ios, web)
        #[arg(long, default_value = "android", value_parser = Platform::from_str)]
        platform: Platform,

        /// Print JSON instead of one line per value
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let run = RunOptions {
        config: args.config,
        product: args.product,
    };

    let result = match args.commands {
        Commands::Localize => run_localize_command(&run),
        Commands::Check => run_check_command(&run),
        Commands::Show {
            language,
            platform,
            json,
        } => run_show_command(&ShowOptions {
            run,
            language,
            platform,
            json,
        }),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}
