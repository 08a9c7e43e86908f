#![warn(missing_docs)]
//! Perftester CLI Library
//!
//! Compares the speed of external programs from the command line. Every trial
//! draws one random integer and passes it, as text, to each program as its
//! only argument; the full process run is timed.
//!
//! # Example
//!
//! ```text
//! perftester run fast=./prime_fast slow=./prime_slow -n 50 --metric median
//! ```

mod config;
mod planner;

pub use config::*;
pub use planner::{ExecutionPlan, ProgramSpec, build_plan, parse_metric};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use perftester_core::{BarProgress, Harness};
use perftester_report::{
    OutputFormat, Separator, generate_csv_report, generate_json_report, select_element_in_table,
};
use perftester_stats::{Metric, SECONDS, StatsCollection};
use rand::Rng;
use regex::Regex;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Perftester CLI arguments
#[derive(Parser, Debug)]
#[command(name = "perftester")]
#[command(author, version, about = "Perftester - compare the speed of competing programs")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Optional subcommand (Run, List, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments for the default run
    #[command(flatten)]
    pub run: RunArgs,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare programs (default)
    Run(RunArgs),
    /// Show which programs would be compared, without running them
    List(RunArgs),
    /// Print a default perftester.toml
    Init,
}

/// Options shared by `run` and `list`
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Programs to compare, as LABEL=PATH or PATH
    #[arg(value_name = "PROGRAM")]
    pub programs: Vec<ProgramSpec>,

    /// Number of trials
    #[arg(short = 'n', long)]
    pub num_tests: Option<usize>,

    /// Directory that relative program paths are resolved against
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Smallest generated input (inclusive)
    #[arg(long)]
    pub min: Option<u64>,

    /// Largest generated input (exclusive)
    #[arg(long)]
    pub max: Option<u64>,

    /// Only compare programs whose label matches this regex
    #[arg(long)]
    pub filter: Option<String>,

    /// Extra metric column: median or pNN (repeatable)
    #[arg(long = "metric", value_name = "METRIC")]
    pub metrics: Vec<String>,

    /// Output format: table, json, csv
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not clear the terminal before printing the table
    #[arg(long)]
    pub no_clear: bool,

    /// Pick a cell from the result table interactively
    #[arg(long)]
    pub select: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Effective settings after layering perftester.toml and CLI flags
#[derive(Debug)]
pub struct Settings {
    /// Trials per comparison
    pub num_tests: usize,
    /// Directory for relative program paths
    pub program_dir: Option<PathBuf>,
    /// Inclusive lower input bound
    pub min: u64,
    /// Exclusive upper input bound
    pub max: u64,
    /// Output format
    pub format: OutputFormat,
    /// Clear the terminal before a table is printed
    pub clear_screen: bool,
    /// Metrics added after the defaults
    pub extra_metrics: Vec<Metric>,
}

impl Settings {
    /// Layer CLI flags over configuration values
    pub fn resolve(args: &RunArgs, config: &PerfConfig) -> anyhow::Result<Self> {
        let min = args.min.unwrap_or(config.generator.min);
        let max = args.max.unwrap_or(config.generator.max);
        if min >= max {
            anyhow::bail!("Empty input range: min ({min}) must be below max ({max})");
        }

        let format = args
            .format
            .as_deref()
            .unwrap_or(config.output.format.as_str())
            .parse::<OutputFormat>()
            .map_err(anyhow::Error::msg)?;

        // Config metrics first, then CLI additions
        let extra_metrics = config
            .output
            .metrics
            .iter()
            .chain(&args.metrics)
            .map(|name| parse_metric(name, Some(SECONDS)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(anyhow::Error::msg)?;

        let config_dir = config.runner.program_dir.as_ref();
        Ok(Self {
            num_tests: args.num_tests.unwrap_or(config.runner.num_tests),
            program_dir: args.dir.clone().or_else(|| config_dir.cloned()),
            min,
            max,
            format,
            clear_screen: config.output.clear_screen && !args.no_clear,
            extra_metrics,
        })
    }
}

/// Run the Perftester CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Perftester CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Init) => {
            print!("{}", PerfConfig::default_toml());
            Ok(())
        }
        Some(Commands::List(args)) => {
            init_logging(args.verbose);
            let config = PerfConfig::discover().unwrap_or_default();
            let settings = Settings::resolve(&args, &config)?;
            let plan = plan_programs(&args)?;
            list_programs(&plan, &settings, &mut io::stdout().lock())?;
            Ok(())
        }
        Some(Commands::Run(args)) => run_comparison(&args),
        None => run_comparison(&cli.run),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "perftester=debug"
    } else {
        "perftester=info"
    };
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Build the plan, applying `--filter` to program labels
fn plan_programs(args: &RunArgs) -> anyhow::Result<ExecutionPlan> {
    let filter = args
        .filter
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("Invalid --filter pattern")?;

    Ok(build_plan(args.programs.iter().cloned(), filter.as_ref()))
}

/// Print the resolved candidates
pub fn list_programs<W: Write>(
    plan: &ExecutionPlan,
    settings: &Settings,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(writer, "Perftester Plan:")?;
    for program in &plan.programs {
        let path = program.resolved_path(settings.program_dir.as_deref());
        writeln!(
            writer,
            "├── {} ({})",
            program.display_label(),
            path.display()
        )?;
    }
    writeln!(
        writer,
        "{} programs, {} trials, inputs in [{}, {}).",
        plan.programs.len(),
        settings.num_tests,
        settings.min,
        settings.max
    )
}

fn run_comparison(args: &RunArgs) -> anyhow::Result<()> {
    init_logging(args.verbose);

    // Discover perftester.toml configuration (CLI flags override)
    let config = PerfConfig::discover().unwrap_or_default();
    let settings = Settings::resolve(args, &config)?;
    let plan = plan_programs(args)?;

    if plan.programs.is_empty() {
        println!("No programs to compare.");
        return Ok(());
    }

    let start = Instant::now();
    let collection = compare_programs(&plan, &settings)?;
    info!(
        programs = plan.programs.len(),
        "Finished in {:.2}s",
        start.elapsed().as_secs_f64()
    );

    match &args.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_output(&collection, settings.format, &mut file, false)?;
            info!("Report written to: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            write_output(
                &collection,
                settings.format,
                &mut stdout,
                settings.clear_screen,
            )?;
        }
    }

    if args.select {
        select_result(&collection)?;
    }

    Ok(())
}

/// Run every planned program on shared random inputs
pub fn compare_programs(
    plan: &ExecutionPlan,
    settings: &Settings,
) -> anyhow::Result<StatsCollection> {
    let (min, max) = (settings.min, settings.max);
    let mut rng = rand::thread_rng();
    let mut harness = Harness::new(settings.num_tests, move || {
        rng.gen_range(min..max).to_string()
    })
    .with_progress(BarProgress::new());
    if let Some(dir) = &settings.program_dir {
        harness = harness.with_program_dir(dir);
    }

    for program in &plan.programs {
        harness.add_program(program.label.clone(), program.path.clone(), |input: &String| {
            [input.clone()]
        })?;
    }

    harness.run_tests()?;

    let mut collection = StatsCollection::new();
    collection.register_metrics(settings.extra_metrics.iter().cloned());
    harness.collect_into(&mut collection);
    Ok(collection)
}

/// Write the collection in the chosen format
pub fn write_output<W: Write>(
    collection: &StatsCollection,
    format: OutputFormat,
    writer: &mut W,
    clear: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => collection.write_all_stats(writer, clear)?,
        OutputFormat::Json => {
            let json = generate_json_report(&collection.to_report())?;
            writeln!(writer, "{json}")?;
        }
        OutputFormat::Csv => write!(writer, "{}", generate_csv_report(&collection.to_report()))?,
    }
    Ok(())
}

fn select_result(collection: &StatsCollection) -> anyhow::Result<()> {
    let grid = collection.table_rows();
    let stdin = io::stdin();
    let selection = select_element_in_table(
        &grid,
        "Select a result",
        &Separator::default(),
        stdin.lock(),
        io::stdout().lock(),
    )?;

    match selection {
        Some(selection) => match selection.value {
            Some(value) => println!("Selected: {}", value.trim()),
            None => println!("Selected an empty cell"),
        },
        None => println!("No selection made"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("perftester").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_default_command_is_run() {
        let cli = parse(&[
            "fast=./a", "./b", "-n", "5", "--metric", "median", "--metric", "p90",
        ]);

        assert!(cli.command.is_none());
        assert_eq!(cli.run.programs.len(), 2);
        assert_eq!(cli.run.programs[0].label, "fast");
        assert_eq!(cli.run.num_tests, Some(5));
        assert_eq!(cli.run.metrics, vec!["median", "p90"]);
    }

    #[test]
    fn test_subcommands() {
        let cli = parse(&["list", "a", "--dir", "bin"]);
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.programs[0].path, PathBuf::from("a"));
                assert_eq!(args.dir, Some(PathBuf::from("bin")));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(matches!(parse(&["init"]).command, Some(Commands::Init)));
        let run = parse(&["run", "-v", "x"]);
        assert!(matches!(run.command, Some(Commands::Run(_))));
    }

    #[test]
    fn test_settings_cli_overrides_config() {
        let mut config = PerfConfig::default();
        config.runner.num_tests = 20;
        config.output.metrics = vec!["median".to_string()];

        let args = RunArgs {
            num_tests: Some(3),
            min: Some(10),
            max: Some(20),
            format: Some("json".to_string()),
            metrics: vec!["p99".to_string()],
            no_clear: true,
            ..Default::default()
        };
        let settings = Settings::resolve(&args, &config).unwrap();

        assert_eq!(settings.num_tests, 3);
        assert_eq!((settings.min, settings.max), (10, 20));
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(!settings.clear_screen);
        let labels: Vec<_> = settings.extra_metrics.iter().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["median", "p99"]);
    }

    #[test]
    fn test_settings_validation() {
        let config = PerfConfig::default();

        let empty_range = RunArgs {
            min: Some(5),
            max: Some(5),
            ..Default::default()
        };
        assert!(Settings::resolve(&empty_range, &config).is_err());

        let bad_format = RunArgs {
            format: Some("yaml".to_string()),
            ..Default::default()
        };
        assert!(Settings::resolve(&bad_format, &config).is_err());

        let bad_metric = RunArgs {
            metrics: vec!["mode".to_string()],
            ..Default::default()
        };
        assert!(Settings::resolve(&bad_metric, &config).is_err());
    }

    #[test]
    fn test_list_programs() {
        let args = RunArgs {
            programs: vec!["fast=prime".parse().unwrap(), "/bin/slow".parse().unwrap()],
            dir: Some(PathBuf::from("/opt")),
            filter: Some("^(fast|slow)$".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(&args, &PerfConfig::default()).unwrap();
        let plan = plan_programs(&args).unwrap();

        let mut out = Vec::new();
        list_programs(&plan, &settings, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("├── fast (/opt/prime)"));
        assert!(text.contains("├── slow (/bin/slow)"));
        assert!(text.contains("2 programs, 100 trials"));
    }

    #[test]
    fn test_invalid_filter() {
        let args = RunArgs {
            filter: Some("(".to_string()),
            ..Default::default()
        };
        assert!(plan_programs(&args).is_err());
    }

    #[test]
    fn test_write_output_formats() {
        let mut collection = StatsCollection::new();
        collection.add_stats("prog", vec![0.01, 0.02], None);

        let mut table = Vec::new();
        write_output(&collection, OutputFormat::Table, &mut table, false).unwrap();
        assert!(String::from_utf8(table).unwrap().contains("| prog "));

        let mut json = Vec::new();
        write_output(&collection, OutputFormat::Json, &mut json, false).unwrap();
        let report =
            perftester_report::parse_json_report(&String::from_utf8(json).unwrap()).unwrap();
        assert_eq!(report.entries[0].label, "prog");

        let mut csv = Vec::new();
        write_output(&collection, OutputFormat::Csv, &mut csv, false).unwrap();
        let csv = String::from_utf8(csv).unwrap();
        assert!(csv.starts_with(perftester_report::CSV_HEADER));
    }

    #[cfg(unix)]
    #[test]
    fn test_compare_programs() {
        let plan = build_plan(vec!["ok=/bin/true".parse().unwrap()], None);
        let settings = Settings {
            num_tests: 2,
            program_dir: None,
            min: 1,
            max: 10,
            format: OutputFormat::Table,
            clear_screen: false,
            extra_metrics: vec![Metric::median(Some(SECONDS))],
        };

        let collection = compare_programs(&plan, &settings).unwrap();
        let stats = collection.get("ok").unwrap();
        assert_eq!(stats.data().len(), 2);
        assert!(stats.raw("median").is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_aborts() {
        let plan = build_plan(vec!["no=/bin/false".parse().unwrap()], None);
        let settings = Settings {
            num_tests: 3,
            program_dir: None,
            min: 1,
            max: 10,
            format: OutputFormat::Table,
            clear_screen: false,
            extra_metrics: Vec::new(),
        };

        let err = compare_programs(&plan, &settings).unwrap_err();
        assert!(err.to_string().contains("'no' failed in trial 0"));
    }
}
