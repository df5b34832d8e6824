use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;
use wikiq_lang::QueryConfig;
use wikiq_lang::cli::{self, CheckOptions, CliError};

#[derive(ClapParser)]
#[command(name = "wikiq")]
#[command(about = "wikiq - parse and check inline wiki queries")]
#[command(version)]
struct Cli {
    /// Show parser debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query and report its structure and problems
    Check {
        /// The query (reads from stdin if not provided)
        query: Option<String>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Default namespaces, e.g. 0,14
        #[arg(long, value_delimiter = ',')]
        default_ns: Option<Vec<i32>>,

        /// Printout parameter such as ?Population (repeatable)
        #[arg(long = "print")]
        print_requests: Vec<String>,

        /// Apply size and depth limits
        #[arg(long)]
        prune: bool,

        /// Size limit for --prune
        #[arg(long)]
        max_size: Option<usize>,

        /// Depth limit for --prune
        #[arg(long)]
        max_depth: Option<usize>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,

        /// Pretty-print the JSON report
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'wikiq docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("wikiq_lang={}", log_level));
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check {
            query,
            config,
            default_ns,
            print_requests,
            prune,
            max_size,
            max_depth,
            json,
            pretty,
        } => run_check(
            query,
            config,
            CheckOptions {
                default_namespaces: default_ns,
                print_requests,
                prune,
                max_size,
                max_depth,
                ..CheckOptions::default()
            },
            json || pretty,
            pretty,
        ),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => match cli::get_doc_category(&category) {
            Ok(content) => {
                print!("{}", content);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    query: Option<String>,
    config: Option<PathBuf>,
    options: CheckOptions,
    json: bool,
    pretty: bool,
) -> Result<(), CliError> {
    let query = match query {
        Some(q) => q,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        None => return Err(CliError::NoQuery),
    };

    let config = match config {
        Some(path) => QueryConfig::from_json_file(path)?,
        None => QueryConfig::default(),
    };

    let options = CheckOptions {
        query,
        config,
        ..options
    };
    let checked = cli::execute_check(&options)?;

    if json {
        let report = cli::query_report(&checked);
        let out = if pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        println!("{}", out);
    } else {
        print!("{}", cli::render_text(&checked));
    }
    Ok(())
}
