#![warn(missing_docs)]
//! LaneBench CLI Library
//!
//! Wires the kernel suite, the randomized runner and the report outputs
//! into the `lanebench` command.
//!
//! ```ignore
//! fn main() {
//!     if let Err(e) = lanebench_cli::run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

mod config;
mod metadata;
mod progress;

pub use config::{CONFIG_FILE, LaneConfig, OutputSection, RunnerSection, YieldMode, parse_duration};
pub use metadata::build_report_meta;
pub use progress::BarProgress;

use clap::{Parser, Subcommand};
use lanebench_core::{ProgressSink, Registry, RunOutcome, Runner};
use lanebench_kernels::register_suite;
use lanebench_report::{
    ChartLayout, HtmlChart, OutputFormat, Report, ReportConfig, ReportSummary, build_report,
    format_human_output, generate_csv_report, generate_html_report, generate_json_report,
    publish,
};
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// LaneBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "lanebench")]
#[command(author, version, about = "LaneBench - randomized scalar vs SIMD microbenchmarks")]
pub struct Cli {
    /// Optional subcommand (List, Run, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter trials by regex on "group/kind"
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Run this group only
    #[arg(long)]
    pub group: Option<String>,

    /// Run this kind only
    #[arg(long)]
    pub kind: Option<String>,

    /// Output format: human, json, csv, html (default from lanebench.toml)
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Trials per (group, kind)
    #[arg(long)]
    pub replication: Option<usize>,

    /// Repetitions per trial, including the discarded warm-up
    #[arg(long)]
    pub repetitions: Option<usize>,

    /// Seed for a reproducible trial order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the HTML chart to this path
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Skip the HTML chart
    #[arg(long, conflicts_with = "chart")]
    pub no_chart: bool,

    /// Configuration file (default: discover lanebench.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// List registrations and their replica counts
    List,
    /// Run the suite (default)
    Run,
    /// Write a default lanebench.toml into the current directory
    Init,
}

/// Run the LaneBench CLI with the process arguments
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the LaneBench CLI with pre-parsed arguments
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let filter = if cli.verbose {
        "lanebench=debug"
    } else {
        "lanebench=info"
    };
    // A subscriber may already be installed when embedded (tests, other binaries).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if cli.command == Some(Commands::Init) {
        return init_config();
    }

    let config = load_config(&cli)?;
    let registry = build_registry(&cli, &config)?;

    match cli.command {
        Some(Commands::List) => {
            print!("{}", format_registrations(&registry));
            Ok(())
        }
        _ => run_suite(&cli, &config, registry),
    }
}

/// Load the configuration file and apply CLI overrides
pub fn load_config(cli: &Cli) -> anyhow::Result<LaneConfig> {
    let mut config = match &cli.config {
        Some(path) => LaneConfig::load(path)
            .map_err(|e| anyhow::anyhow!("failed to load {}: {}", path.display(), e))?,
        None => LaneConfig::discover()?,
    };

    if let Some(replication) = cli.replication {
        config.runner.replication = replication;
    }
    if let Some(repetitions) = cli.repetitions {
        config.runner.repetitions = repetitions;
    }
    if cli.seed.is_some() {
        config.runner.seed = cli.seed;
    }
    if let Some(format) = &cli.format {
        config.output.format = format.clone();
    }
    if cli.no_chart {
        config.output.chart = false;
    } else if cli.chart.is_some() {
        config.output.chart = true;
    }

    Ok(config)
}

/// Registrations selected by the filter regex and the group/kind flags
#[derive(Debug)]
pub struct Selection {
    pattern: Regex,
    group: Option<String>,
    kind: Option<String>,
}

impl Selection {
    /// Build the selection from CLI options
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let pattern = Regex::new(&cli.filter)
            .map_err(|e| anyhow::anyhow!("invalid filter '{}': {}", cli.filter, e))?;
        Ok(Self {
            pattern,
            group: cli.group.clone(),
            kind: cli.kind.clone(),
        })
    }

    /// Whether (group, kind) is selected
    pub fn matches(&self, group: &str, kind: &str) -> bool {
        self.group.as_deref().is_none_or(|g| g == group)
            && self.kind.as_deref().is_none_or(|k| k == kind)
            && self.pattern.is_match(&format!("{}/{}", group, kind))
    }
}

/// Register the kernel suite and drop unselected registrations
pub fn build_registry(cli: &Cli, config: &LaneConfig) -> anyhow::Result<Registry> {
    let selection = Selection::from_cli(cli)?;
    let mut registry = Registry::with_replication(config.runner.replication);
    register_suite(&mut registry, &config.kernels)?;
    registry.retain(|group, kind| selection.matches(group, kind));
    Ok(registry)
}

/// Tree of registrations with replica counts
pub fn format_registrations(registry: &Registry) -> String {
    let mut output = String::from("LaneBench Plan:\n");

    let mut groups: Vec<(&str, Vec<(&str, usize)>)> = Vec::new();
    for r in registry.registrations() {
        match groups.iter_mut().find(|(g, _)| *g == r.group()) {
            Some((_, kinds)) => kinds.push((r.kind(), r.replication())),
            None => groups.push((r.group(), vec![(r.kind(), r.replication())])),
        }
    }

    for (group, kinds) in &groups {
        output.push_str(&format!("├── group: {}\n", group));
        for (kind, replication) in kinds {
            output.push_str(&format!("│   ├── {} (x{})\n", kind, replication));
        }
    }
    output.push_str(&format!(
        "{} registrations, {} trials.\n",
        registry.len(),
        registry.total_trials()
    ));
    output
}

/// Drive `registry` to completion with the configured runner settings
pub fn execute<P>(
    config: &LaneConfig,
    registry: Registry,
    progress: P,
) -> anyhow::Result<RunOutcome>
where
    P: ProgressSink + Send + 'static,
{
    let runner_config = config.runner_config()?;
    let mut runner = Runner::new(registry, runner_config).with_progress(progress);
    Ok(runner.run()?)
}

/// Assemble the report for a finished run
pub fn assemble_report(config: &LaneConfig, outcome: &RunOutcome) -> Report {
    let report_config = ReportConfig {
        replication: config.runner.replication,
        repetitions: config.runner.repetitions,
        seed: config.runner.seed,
        baseline_kind: config.output.baseline_kind.clone(),
    };
    let summary = ReportSummary {
        trials: outcome.trials,
        samples: outcome.samples,
        buckets: outcome.statistics.len(),
        duration_ms: outcome.duration.as_secs_f64() * 1000.0,
        cycles_per_ns: outcome.cycles_per_ns,
    };
    build_report(
        build_report_meta(),
        report_config,
        &outcome.statistics,
        summary,
    )
}

/// Render a report in `format`
pub fn render(report: &Report, format: OutputFormat, layout: &ChartLayout) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Csv => generate_csv_report(report),
        OutputFormat::Html => generate_html_report(report, layout),
        OutputFormat::Human => format_human_output(report, layout),
    })
}

fn run_suite(cli: &Cli, config: &LaneConfig, registry: Registry) -> anyhow::Result<()> {
    if registry.is_empty() {
        warn!(filter = %cli.filter, "no registrations selected");
        println!("No trials selected.");
        return Ok(());
    }

    let format: OutputFormat = config
        .output
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    println!(
        "Running {} trials over {} registrations...\n",
        registry.total_trials(),
        registry.len()
    );

    let outcome = execute(config, registry, BarProgress::new())?;
    let report = assemble_report(config, &outcome);
    let layout = ChartLayout::default();

    let output = render(&report, format, &layout)?;
    match &cli.output {
        Some(path) => {
            write_file(path, &output)?;
            println!("Report written to: {}", path.display());
        }
        None => print!("{}", output),
    }

    if config.output.chart {
        let path = cli
            .chart
            .clone()
            .unwrap_or_else(|| Path::new(&config.output.directory).join("chart.html"));
        let html = publish(&outcome.statistics, &layout, &mut HtmlChart);
        write_file(&path, &html)?;
        info!(path = %path.display(), "chart written");
    }

    Ok(())
}

fn init_config() -> anyhow::Result<()> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE);
    }
    write_file(path, &LaneConfig::default_toml())?;
    println!("Created {}", CONFIG_FILE);
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}
