use addrgram::dataset::{read_csv_path, Dataset};
use addrgram::error::QueryError;
use addrgram::index::{read_index_file, stats::show_stats, write_index_file};
use addrgram::output::{print_result_count, print_results};
use addrgram::query::MIN_QUERY_CHARS;
use addrgram::session::{SearchSession, Snapshot};
use addrgram::utils::{get_config_path, progress, AppConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use termcolor::ColorChoice;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "addrgram")]
#[command(about = "2-gram inverted index search over address CSV files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the app data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from a CSV file and write it as JSON
    Index {
        /// CSV file with a header row
        csv: PathBuf,

        /// Output index file
        #[arg(short, long, default_value = "invertedIndex.json")]
        output: PathBuf,

        /// CSV text encoding (overrides config)
        #[arg(short, long)]
        encoding: Option<String>,
    },
    /// Search a CSV file (interactive when no query is given)
    Search {
        /// CSV file with a header row
        csv: PathBuf,

        /// Search query (at least 2 characters)
        query: Option<String>,

        /// Prebuilt index file; built in memory when omitted
        #[arg(short, long)]
        index: Option<PathBuf>,

        /// CSV text encoding (overrides config)
        #[arg(short, long)]
        encoding: Option<String>,

        /// Maximum number of results to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only print the number of results
        #[arg(short, long)]
        count: bool,

        /// When to use colors
        #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
        color: ColorMode,
    },
    /// Show index statistics
    Stats {
        /// Index file
        #[arg(default_value = "invertedIndex.json")]
        index: PathBuf,
    },
    /// Show the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// Output options for the search command
struct SearchOutput {
    limit: Option<usize>,
    count: bool,
    color: ColorChoice,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Index {
            csv,
            output,
            encoding,
        } => {
            let encoding = encoding.unwrap_or_else(|| config.encoding.clone());
            run_index(&csv, &output, &encoding, &config, cli.quiet)?;
        }
        Commands::Search {
            csv,
            query,
            index,
            encoding,
            limit,
            count,
            color,
        } => {
            let encoding = encoding.unwrap_or_else(|| config.encoding.clone());
            let snapshot = load_snapshot(&csv, index.as_deref(), &encoding, &config, cli.quiet)?;
            let session = SearchSession::new(snapshot, config.query_cache_size);
            let output = SearchOutput {
                limit,
                count,
                color: color.into(),
            };

            match query {
                Some(query) => run_query(&session, &query, &output)?,
                None => run_interactive(&session, &output)?,
            }
        }
        Commands::Stats { index } => {
            show_stats(&index)?;
        }
        Commands::Config { init } => {
            show_config(cli.config.as_deref(), &config, init)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "addrgram=debug" } else { "addrgram=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

fn load_dataset(csv: &Path, encoding: &str, quiet: bool) -> Result<Dataset> {
    let spinner = progress::spinner("Reading CSV...", quiet);
    let dataset = read_csv_path(csv, encoding)
        .with_context(|| format!("Failed to load {}", csv.display()))?;
    progress::finish(spinner, format!("Read {} records", dataset.len()));
    Ok(dataset)
}

fn run_index(csv: &Path, output: &Path, encoding: &str, config: &AppConfig, quiet: bool) -> Result<()> {
    let dataset = load_dataset(csv, encoding, quiet)?;
    let snapshot = Snapshot::build(dataset, &config.schema(), quiet)?;

    write_index_file(snapshot.index(), output)?;

    if !quiet {
        println!("Index stored at: {}", output.display());
    }
    Ok(())
}

fn load_snapshot(
    csv: &Path,
    index_path: Option<&Path>,
    encoding: &str,
    config: &AppConfig,
    quiet: bool,
) -> Result<Snapshot> {
    let dataset = load_dataset(csv, encoding, quiet)?;

    let schema = config.schema();
    let snapshot = match index_path {
        Some(path) => {
            let index = read_index_file(path)
                .with_context(|| format!("Failed to load index {}", path.display()))?;
            Snapshot::with_index(dataset, &schema, index)
                .with_context(|| format!("Index {} does not match {}", path.display(), csv.display()))?
        }
        None => Snapshot::build(dataset, &schema, quiet)?,
    };

    Ok(snapshot)
}

fn run_query(session: &SearchSession, query: &str, output: &SearchOutput) -> Result<()> {
    let hits = session.search(query)?;

    if output.count {
        print_result_count(hits.len(), output.color)?;
        return Ok(());
    }

    let mut lines = hits.lines();
    if let Some(limit) = output.limit {
        lines.truncate(limit);
    }
    print_results(&lines, query, output.color)?;
    Ok(())
}

/// Read one query per line until EOF
fn run_interactive(session: &SearchSession, output: &SearchOutput) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "query> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(());
        }

        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        match run_query(session, query, output) {
            Ok(()) => {}
            Err(e) if e.downcast_ref::<QueryError>().is_some() => {
                eprintln!("Enter at least {} characters", MIN_QUERY_CHARS);
            }
            Err(e) => return Err(e),
        }
    }
}

fn show_config(path: Option<&Path>, config: &AppConfig, init: bool) -> Result<()> {
    let path = path.map(Path::to_path_buf).or_else(get_config_path);

    if init {
        let path = path.context("Could not determine app data directory")?;
        AppConfig::default().save_to(&path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    match path {
        Some(path) if path.exists() => println!("Config file: {}", path.display()),
        Some(path) => println!("Config file: {} (not found, using defaults)", path.display()),
        None => println!("Config file: none (using defaults)"),
    }
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
