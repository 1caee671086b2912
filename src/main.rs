//! IP Radix - Main entrypoint.
//!
//! Loads prefix tables into a radix trie and answers longest-prefix-match
//! lookups from the command line. Results go to stdout, logs to stderr.

use clap::{Parser, Subcommand, ValueEnum};
use ip_radix_lib::config::{ConfigLoader, IpRadixConfig, LogConfig, ENV_PREFIX};
use ip_radix_lib::error::{report_error, ErrorContext, RadixError, RadixResult};
use ip_radix_lib::ingest::{self, LoadStats, RecordFormat, TableLoader};
use ip_radix_lib::utils::IdGenerator;
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for IP Radix.
#[derive(Parser, Debug)]
#[clap(name = "IP Radix", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Address family of a prefix table.
#[derive(ValueEnum, Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum Family {
    V4,
    V6,
}

/// Options shared by commands that load a table.
#[derive(clap::Args, Debug)]
struct TableArgs {
    /// Prefix table to load
    #[clap(short, long, value_parser)]
    table: PathBuf,

    /// Address family of the table
    #[clap(short, long, value_enum, default_value_t = Family::V4)]
    family: Family,

    /// Read values as nginx-style hex terminated by ';'
    #[clap(long)]
    nginx: bool,

    /// Print JSON lines instead of tab-separated text
    #[clap(long)]
    json: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Look up addresses in a prefix table
    Lookup {
        #[clap(flatten)]
        table: TableArgs,

        /// Addresses to look up
        #[clap(required = true)]
        addresses: Vec<String>,
    },

    /// Load a prefix table and print load statistics
    Stats {
        #[clap(flatten)]
        table: TableArgs,
    },

    /// Generate unique identifiers
    GenId {
        /// Number of identifiers to print
        #[clap(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// One lookup answer.
#[derive(Serialize)]
struct LookupResult<'a, V> {
    address: &'a str,
    value: Option<V>,
}

/// Summary printed by the `stats` command.
#[derive(Serialize)]
struct StatsReport {
    family: Family,
    #[serde(flatten)]
    stats: LoadStats,
    nodes: usize,
    capacity: usize,
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> RadixResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log.level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| RadixError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Initialize logging, falling back to a message on standard error.
///
/// Returns whether the subscriber was installed.
fn init_logging_or_warn(log: &LogConfig) -> bool {
    match init_logging(log) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Logging unavailable: {e}");
            false
        }
    }
}

fn table_loader(config: &IpRadixConfig, table: &TableArgs) -> TableLoader {
    let loader = TableLoader::from_config(&config.ingest, &config.trie);
    if table.nginx {
        loader.with_format(RecordFormat::Nginx)
    } else {
        loader
    }
}

fn print_lookup<V: Display + Serialize>(
    address: &str,
    value: Option<V>,
    json: bool,
) -> RadixResult<()> {
    if json {
        println!("{}", serde_json::to_string(&LookupResult { address, value })?);
    } else {
        match value {
            Some(value) => println!("{address}\t{value}"),
            None => println!("{address}\t-"),
        }
    }
    Ok(())
}

fn run_lookup(config: &IpRadixConfig, table: &TableArgs, addresses: &[String]) -> RadixResult<()> {
    let loader = table_loader(config, table);
    match table.family {
        Family::V4 => {
            let (trie, _) = loader.load_narrow_from_path(&table.table)?;
            for address in addresses {
                let value = trie.select_value(ingest::parse_ipv4(address)?);
                print_lookup(address, value, table.json)?;
            }
        }
        Family::V6 => {
            let (trie, _) = loader.load_wide_from_path(&table.table)?;
            for address in addresses {
                let value = trie.select_value(ingest::parse_ipv6(address)?);
                print_lookup(address, value, table.json)?;
            }
        }
    }
    Ok(())
}

fn run_stats(config: &IpRadixConfig, table: &TableArgs) -> RadixResult<()> {
    let loader = table_loader(config, table);
    let (stats, nodes, capacity) = match table.family {
        Family::V4 => {
            let (trie, stats) = loader.load_narrow_from_path(&table.table)?;
            (stats, trie.size(), trie.capacity())
        }
        Family::V6 => {
            let (trie, stats) = loader.load_wide_from_path(&table.table)?;
            (stats, trie.size(), trie.capacity())
        }
    };

    let report = StatsReport {
        family: table.family,
        stats,
        nodes,
        capacity,
    };
    if table.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("lines\t{}", report.stats.lines);
        println!("inserted\t{}", report.stats.inserted);
        println!("skipped_blank\t{}", report.stats.skipped_blank);
        println!("skipped_illegal\t{}", report.stats.skipped_illegal);
        println!("skipped_malformed\t{}", report.stats.skipped_malformed);
        println!("nodes\t{}", report.nodes);
        println!("capacity\t{}", report.capacity);
    }
    Ok(())
}

fn run_gen_id(config: &IpRadixConfig, count: usize) -> RadixResult<()> {
    let mut generator = IdGenerator::new(&config.id_gen)?;
    for _ in 0..count {
        println!("{}", generator.next_id()?);
    }
    Ok(())
}

fn run_gen_config(output: &Path) -> RadixResult<()> {
    info!("Generating default configuration");
    let default_config = IpRadixConfig::default();

    // Create parent directories if they don't exist
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&default_config)
        .map_err(|e| RadixError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    info!("Default configuration written to {:?}", output);
    Ok(())
}

fn run(command: Command, config: &IpRadixConfig) -> RadixResult<()> {
    match command {
        Command::Lookup { table, addresses } => run_lookup(config, &table, &addresses),
        Command::Stats { table } => run_stats(config, &table),
        Command::GenId { count } => run_gen_id(config, count),
        Command::Validate => {
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => run_gen_config(&output),
    }
}

/// Main entry point for the application.
fn main() -> ExitCode {
    let args = Args::parse();

    let config_loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);
    let config = match config_loader.load() {
        Ok(config) => config,
        Err(e) => {
            // Logging still comes up so the failure is reported in the usual format
            if init_logging_or_warn(&LogConfig::default()) {
                ip_radix_lib::init();
            }
            report_error(ErrorContext::new(e.into(), "config"));
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.log) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    ip_radix_lib::init();

    match run(args.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(ErrorContext::new(e, "cli"));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_fallback_when_subscriber_already_set() {
        let log = LogConfig::default();
        assert!(init_logging_or_warn(&log));

        // A second global subscriber is refused and reported instead of dropped
        assert!(init_logging(&log).is_err());
        assert!(!init_logging_or_warn(&log));
    }
}
