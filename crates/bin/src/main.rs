//! Hobart CLI binary.
//!
//! Scores companies in a fundamentals snapshot against their peers.

mod logging;

use clap::{Parser, Subcommand};
use hobart::{
    DEFAULT_CONCURRENCY, FetchConfig, Profile, ScoreReport, ScreenRun, SemiconductorUniverse,
    Subsector, Universe, Watchlist, builtin_profiles, screen,
};
use hobart_data::SnapshotProvider;
use hobart_metrics::{MetricCategory, metrics_by_category};
use hobart_output::{ExportFormat, Exporter, breakdown_table, ranking_rows, ranking_table};
use hobart_scoring::{Normalization, ScoringConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: industry-aware fundamental screening", long_about = None)]
#[command(version)]
struct Cli {
    /// Emit logs as JSON (filter with HOBART_LOG)
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the companies in a fundamentals snapshot
    Score {
        /// Fundamentals snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Built-in weight profile
        #[arg(long, default_value = "semiconductors")]
        profile: String,

        /// Custom weight profile (JSON), replaces --profile
        #[arg(long, conflicts_with = "profile")]
        profile_file: Option<PathBuf>,

        /// Comma separated symbols (default: every symbol in the snapshot)
        #[arg(long)]
        symbols: Option<String>,

        /// Normalization strategy (minmax or zscore)
        #[arg(long, default_value = "minmax")]
        normalization: String,

        /// Leave missing values unresolved instead of imputing the peer median
        #[arg(long)]
        no_impute: bool,

        /// Include per-metric scores
        #[arg(long)]
        detailed: bool,

        /// Output format (text, json or csv)
        #[arg(long, default_value = "text")]
        format: String,

        /// Write json or csv output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Concurrent provider requests
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },

    /// List built-in weight profiles
    Profiles {
        /// Show a single profile
        #[arg(long)]
        name: Option<String>,
    },

    /// List metric calculators by category
    Metrics,

    /// List the semiconductor universe
    Universe {
        /// Filter by subsector
        #[arg(long)]
        subsector: Option<String>,
    },
}

impl Commands {
    /// Subcommand name used in log records.
    const fn name(&self) -> &'static str {
        match self {
            Self::Score { .. } => "score",
            Self::Profiles { .. } => "profiles",
            Self::Metrics => "metrics",
            Self::Universe { .. } => "universe",
        }
    }
}

struct ScoreOptions {
    detailed: bool,
    format: String,
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "run failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.json_logs);
    let command = cli.command.name();
    let started = Instant::now();
    info!(command, version = hobart::VERSION, "run started");

    match cli.command {
        Commands::Score {
            snapshot,
            profile,
            profile_file,
            symbols,
            normalization,
            no_impute,
            detailed,
            format,
            output,
            concurrency,
        } => {
            let profile = match profile_file {
                Some(path) => Profile::from_path(path)?,
                None => hobart::profile(&profile)?,
            };
            let config = ScoringConfig::default()
                .with_normalization(normalization.parse::<Normalization>()?)
                .with_imputation(!no_impute);
            let fetch = FetchConfig::default().with_concurrency(concurrency);
            let options = ScoreOptions {
                detailed,
                format,
                output,
            };
            score(&snapshot, &profile, symbols.as_deref(), config, fetch, &options, cli.json_logs).await?;
        }
        Commands::Profiles { name } => list_profiles(name.as_deref())?,
        Commands::Metrics => list_metrics(),
        Commands::Universe { subsector } => list_universe(subsector.as_deref())?,
    }

    info!(
        command,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "run finished"
    );
    Ok(())
}

async fn score(
    snapshot_path: &Path,
    profile: &Profile,
    symbols: Option<&str>,
    config: ScoringConfig,
    fetch: FetchConfig,
    options: &ScoreOptions,
    quiet: bool,
) -> Result<(), Box<dyn Error>> {
    let snapshot = SnapshotProvider::from_path(snapshot_path)?;
    let symbols = symbols.map_or_else(|| snapshot.symbols(), |list| Watchlist::parse(list).symbols());
    if symbols.is_empty() {
        return Err("no symbols to score".into());
    }
    let metrics = profile.metrics()?;
    info!(
        snapshot = %snapshot_path.display(),
        profile = %profile.name,
        symbols = symbols.len(),
        metrics = metrics.len(),
        "scoring snapshot"
    );

    let format = options.format.to_ascii_lowercase();
    let pb = if quiet || format != "text" {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(symbols.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message(format!(
        "Fetching {} symbols ({} concurrent)...",
        symbols.len(),
        fetch.concurrency
    ));

    let table = screen(&snapshot, &symbols, &metrics, &fetch, |symbol| {
        pb.set_message(symbol.to_string());
        pb.inc(1);
    })
    .await?;
    pb.finish_and_clear();

    let assignment = profile.assignment(&SemiconductorUniverse::new(), &symbols)?;
    let report = ScreenRun::new(assignment, config)
        .with_as_of(snapshot.as_of())
        .execute(&table)?;
    info!(
        scored = report.card.defined_count(),
        total = report.card.len(),
        warnings = report.warnings.len(),
        "screen complete"
    );

    match format.as_str() {
        "text" => print_report(profile, config, &report, options.detailed),
        other => {
            let format: ExportFormat = other.parse()?;
            let content = if options.detailed {
                match format {
                    ExportFormat::Csv => report.breakdown.export_to_string(format)?,
                    ExportFormat::Json => serde_json::to_string(&report)?,
                    ExportFormat::PrettyJson => serde_json::to_string_pretty(&report)?,
                }
            } else {
                ranking_rows(&report.card).export_to_string(format)?
            };
            match &options.output {
                Some(path) => {
                    std::fs::write(path, content)?;
                    eprintln!("Wrote {}", path.display());
                }
                None => print!("{content}"),
            }
        }
    }

    Ok(())
}

fn print_report(profile: &Profile, config: ScoringConfig, report: &ScoreReport, detailed: bool) {
    println!("\n{}", "=".repeat(60));
    println!("{:^60}", format!("{} SCREEN", profile.name.to_uppercase()));
    println!("{}", "=".repeat(60));
    if let Some(as_of) = report.as_of {
        println!("Fundamentals as of: {as_of}");
    }
    println!(
        "Normalization: {}, missing values: {}",
        config.normalization,
        if config.impute_missing { "peer median" } else { "unresolved" }
    );
    println!(
        "Scored {} of {} companies\n",
        report.card.defined_count(),
        report.card.len()
    );

    print!("{}", ranking_table(&report.card));
    if detailed {
        println!("\nPer-metric scores (0-100):");
        print!("{}", breakdown_table(&report.breakdown));
    }
    for warning in &report.warnings {
        println!("Warning: {warning}");
    }
}

fn print_profile(profile: &Profile) -> Result<(), Box<dyn Error>> {
    println!("\n{} - {}", profile.name, profile.description);
    let segments = profile.segments();
    if segments.is_empty() {
        for (key, weight) in profile.base.iter() {
            println!("  {key:<28} {weight:>6.3}");
        }
        return Ok(());
    }

    let vectors = segments
        .iter()
        .map(|s| profile.weights_for(s))
        .collect::<Result<Vec<_>, _>>()?;
    print!("  {:<28}", "metric");
    for segment in &segments {
        print!(" {segment:>9}");
    }
    println!();
    for (key, _) in profile.base.iter() {
        print!("  {key:<28}");
        for weights in &vectors {
            print!(" {:>9.3}", weights.get(key));
        }
        println!();
    }
    if let Some(default) = &profile.default_segment {
        println!("  (unclassified symbols use {default})");
    }
    Ok(())
}

fn list_profiles(name: Option<&str>) -> Result<(), Box<dyn Error>> {
    match name {
        Some(name) => print_profile(&hobart::profile(name)?)?,
        None => {
            for profile in builtin_profiles()? {
                print_profile(&profile)?;
            }
        }
    }
    Ok(())
}

fn list_metrics() {
    for category in MetricCategory::ALL {
        println!("\n{category}");
        for info in metrics_by_category(category) {
            println!(
                "  {:<28} {:<30} {:<17} {}",
                info.key, info.name, info.direction, info.description
            );
        }
    }
}

fn list_universe(subsector: Option<&str>) -> Result<(), Box<dyn Error>> {
    let universe = SemiconductorUniverse::new();
    match subsector {
        Some(name) => {
            let subsector: Subsector = name.parse()?;
            println!("{}", universe.symbols_in_subsector(subsector).join(", "));
        }
        None => {
            println!("Semiconductor universe: {} symbols", universe.size());
            for (subsector, count) in universe.subsector_counts() {
                println!(
                    "  {:<10} ({count:>2}) {}",
                    subsector,
                    universe.symbols_in_subsector(subsector).join(", ")
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_score() {
        let cli = Cli::try_parse_from([
            "hobart",
            "score",
            "--snapshot",
            "semis.json",
            "--normalization",
            "zscore",
            "--detailed",
            "--json-logs",
        ])
        .unwrap();

        assert!(cli.json_logs);
        match cli.command {
            Commands::Score {
                profile,
                normalization,
                detailed,
                concurrency,
                ..
            } => {
                assert_eq!(profile, "semiconductors");
                assert_eq!(normalization, "zscore");
                assert!(detailed);
                assert_eq!(concurrency, DEFAULT_CONCURRENCY);
            }
            _ => panic!("expected score command"),
        }
    }

    #[test]
    fn test_command_names() {
        let names: Vec<_> = [
            vec!["hobart", "score", "--snapshot", "semis.json"],
            vec!["hobart", "profiles"],
            vec!["hobart", "metrics"],
            vec!["hobart", "universe", "--subsector", "memory"],
        ]
        .into_iter()
        .map(|args| Cli::try_parse_from(args).unwrap().command.name())
        .collect();
        assert_eq!(names, ["score", "profiles", "metrics", "universe"]);
    }

    #[test]
    fn test_profile_file_conflicts_with_profile() {
        let result = Cli::try_parse_from([
            "hobart",
            "score",
            "--snapshot",
            "semis.json",
            "--profile",
            "cybersecurity",
            "--profile-file",
            "custom.json",
        ]);
        assert!(result.is_err());
    }
}
