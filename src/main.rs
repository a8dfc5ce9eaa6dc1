use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ironreduce::io::output::{write_index, write_json, write_pairs, write_rows, write_word_counts};
use ironreduce::io::text::{read_documents, read_lines};
use ironreduce::jobs::{inverted_index, natural_join, word_count};
use ironreduce::metrics::MetricsCollector;
use ironreduce::{ExecMode, JobConfig, MapReduce};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace};

/// Run sample map-reduce jobs over local files
#[derive(Parser)]
#[command(name = "ironreduce")]
#[command(about = "In-memory map-reduce over local files", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Number of mappers (map partitions)
    #[arg(long, global = true)]
    mappers: Option<usize>,

    /// Number of reducers (key shards)
    #[arg(long, global = true)]
    reducers: Option<usize>,

    /// Run every phase on the main thread
    #[arg(long, global = true)]
    sequential: bool,

    /// JSON job config file; command-line flags override its values
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Write job metrics as JSON to this file
    #[arg(long, global = true)]
    metrics: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count token occurrences across the lines of a file
    WordCount {
        #[arg(long)]
        input: PathBuf,
    },
    /// Map each token to the files containing it
    InvertedIndex {
        /// File path or glob pattern
        #[arg(long)]
        input: String,
    },
    /// Join two CSV tables on their first column
    NaturalJoin {
        #[arg(long)]
        table1: PathBuf,
        #[arg(long)]
        table2: PathBuf,
    },
    /// Run only the word-count map function
    MapOnly {
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_thread_ids(cli.verbose >= 2)
        .with_writer(std::io::stderr)
        .init();

    debug!("ironreduce started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(&cli) {
        error!("Fatal error: {e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn job_config(cli: &Cli) -> Result<JobConfig> {
    let mut config = match &cli.config {
        Some(path) => JobConfig::from_json_file(path)?,
        None => JobConfig::default(),
    };
    if let Some(mappers) = cli.mappers {
        config.mappers = mappers;
    }
    if let Some(reducers) = cli.reducers {
        config.reducers = reducers;
    }
    if cli.sequential {
        config.mode = ExecMode::Sequential;
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = job_config(cli)?;
    info!(
        mappers = config.mappers,
        reducers = config.reducers,
        mode = ?config.mode,
        "job configured"
    );

    let metrics = MetricsCollector::new();
    let driver = MapReduce::from_config(config)?.with_metrics(metrics.clone());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::WordCount { input } => {
            let lines = read_lines(input)?;
            let counts = word_count::run(&driver, &lines)?;
            if cli.json {
                write_json(&mut out, &counts)?;
            } else {
                writeln!(out, "Word Count Results:")?;
                write_word_counts(&mut out, &counts)?;
            }
        }
        Commands::InvertedIndex { input } => {
            let docs = read_documents(input)?;
            let index = inverted_index::run(&driver, &docs)?;
            if cli.json {
                write_json(&mut out, &index)?;
            } else {
                writeln!(out, "Inverted Index Results:")?;
                write_index(&mut out, &index)?;
            }
        }
        Commands::NaturalJoin { table1, table2 } => {
            let rows = read_tables(table1, table2)?;
            let joined = natural_join::run(&driver, &rows)?;
            if cli.json {
                write_json(&mut out, &joined)?;
            } else {
                writeln!(out, "Natural Join Results:")?;
                write_rows(&mut out, &joined)?;
            }
        }
        Commands::MapOnly { input } => {
            let lines = read_lines(input)?;
            let pairs = word_count::run_map_only(&driver, &lines)?;
            if cli.json {
                write_json(&mut out, &pairs)?;
            } else {
                writeln!(out, "Map-Only Results:")?;
                write_pairs(&mut out, &pairs)?;
            }
        }
    }
    out.flush()?;

    if let Some(path) = &cli.metrics {
        metrics
            .save_to_file(path)
            .with_context(|| format!("save metrics to {}", path.display()))?;
        info!(path = %path.display(), "metrics written");
    }
    Ok(())
}

#[cfg(feature = "io-csv")]
fn read_tables(table1: &Path, table2: &Path) -> Result<Vec<(u8, natural_join::Row)>> {
    use ironreduce::io::csv::read_table;

    let mut rows = read_table(table1, natural_join::LEFT)?;
    rows.extend(read_table(table2, natural_join::RIGHT)?);
    Ok(rows)
}

#[cfg(not(feature = "io-csv"))]
fn read_tables(_table1: &Path, _table2: &Path) -> Result<Vec<(u8, natural_join::Row)>> {
    anyhow::bail!("natural-join requires the `io-csv` feature")
}
