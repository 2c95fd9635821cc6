//! Configuration loading from lanebench.toml
//!
//! The file is discovered by walking up from the current directory. Every
//! section and key is optional; CLI flags override file values.

use lanebench_core::{
    CPU_SET_CAPACITY, DEFAULT_REPETITIONS, DEFAULT_REPLICATION, RunnerConfig, YieldPolicy,
};
use lanebench_kernels::KernelConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "lanebench.toml";

/// LaneBench configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LaneConfig {
    /// Scheduling configuration
    #[serde(default)]
    pub runner: RunnerSection,
    /// Kernel sizing
    #[serde(default)]
    pub kernels: KernelConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// How the runner hands control back between trials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum YieldMode {
    /// Sleep for `yield_pause`
    #[default]
    Sleep,
    /// Yield the thread
    Thread,
    /// Run trials back to back
    None,
}

/// `[runner]` section
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerSection {
    /// Trials scheduled per registration
    #[serde(default = "default_replication")]
    pub replication: usize,
    /// Repetitions per trial, the first one discarded as warm-up
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
    /// Seed for the trial order (entropy when absent)
    #[serde(default)]
    pub seed: Option<u64>,
    /// "sleep", "thread" or "none"
    #[serde(default)]
    pub yield_policy: YieldMode,
    /// Pause used by the sleep policy (e.g., "1ms")
    #[serde(default = "default_yield_pause")]
    pub yield_pause: String,
    /// Pin the runner thread to this core
    #[serde(default)]
    pub pin_cpu: Option<usize>,
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            replication: default_replication(),
            repetitions: default_repetitions(),
            seed: None,
            yield_policy: YieldMode::default(),
            yield_pause: default_yield_pause(),
            pin_cpu: None,
        }
    }
}

fn default_replication() -> usize {
    DEFAULT_REPLICATION
}
fn default_repetitions() -> usize {
    DEFAULT_REPETITIONS
}
fn default_yield_pause() -> String {
    "1ms".to_string()
}

/// `[output]` section
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    /// Default output format: "human", "json", "csv", "html"
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory for generated artifacts
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Write the HTML chart after each run
    #[serde(default = "default_chart")]
    pub chart: bool,
    /// Kind speedups are computed against
    #[serde(default = "default_baseline_kind")]
    pub baseline_kind: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: default_output_dir(),
            chart: default_chart(),
            baseline_kind: default_baseline_kind(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_output_dir() -> String {
    "target/lanebench".to_string()
}
fn default_chart() -> bool {
    true
}
fn default_baseline_kind() -> String {
    lanebench_kernels::KIND_SCALAR.to_string()
}

impl LaneConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find `lanebench.toml` by walking up from the current directory
    pub fn find() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Discover and load the configuration; defaults when no file exists
    pub fn discover() -> anyhow::Result<Self> {
        match Self::find() {
            Some(path) => Self::load(&path)
                .map_err(|e| anyhow::anyhow!("failed to load {}: {}", path.display(), e)),
            None => Ok(Self::default()),
        }
    }

    /// Runner settings with the yield pause parsed
    pub fn runner_config(&self) -> anyhow::Result<RunnerConfig> {
        let runner = &self.runner;
        if runner.repetitions < 2 {
            anyhow::bail!(
                "repetitions must be at least 2 (the first one is a warm-up), got {}",
                runner.repetitions
            );
        }
        if let Some(cpu) = runner.pin_cpu.filter(|&cpu| cpu >= CPU_SET_CAPACITY) {
            anyhow::bail!("pin_cpu must be below {CPU_SET_CAPACITY}, got {cpu}");
        }

        let yield_policy = match runner.yield_policy {
            YieldMode::None => YieldPolicy::None,
            YieldMode::Thread => YieldPolicy::Thread,
            YieldMode::Sleep => {
                YieldPolicy::Sleep(Duration::from_nanos(parse_duration(&runner.yield_pause)?))
            }
        };

        Ok(RunnerConfig {
            repetitions: runner.repetitions,
            seed: runner.seed,
            yield_policy,
            pin_cpu: runner.pin_cpu,
        })
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# LaneBench Configuration

[runner]
# Trials scheduled per (group, kind)
replication = 20
# Repetitions per trial; the first one is a discarded warm-up
repetitions = 4
# Fixed seed for a reproducible trial order (uncomment to enable)
# seed = 42
# Between trials: "sleep", "thread" or "none"
yield_policy = "sleep"
yield_pause = "1ms"
# Pin the runner thread to a core (uncomment to enable)
# pin_cpu = 0

[kernels]
# Elements per vector, multiple of 4
vector_len = 2097152
# 4x4 matrix products per execution
matrix_iterations = 10000
# Synthetic Sobel picture
image_width = 400
image_height = 225

[output]
# Default output format: human, json, csv, html
format = "human"
# Output directory for charts
directory = "target/lanebench"
# Write an HTML chart after each run
chart = true
# Speedups are relative to this kind
baseline_kind = "scalar"
"#
        .to_string()
    }
}

/// Parse duration string (e.g., "3s", "500ms", "100us") to nanoseconds
pub fn parse_duration(s: &str) -> anyhow::Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        return Err(anyhow::anyhow!("Empty duration string"));
    }

    let (num_part, unit_part) = s
        .char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| s.split_at(i))
        .unwrap_or((s, "s"));

    let value: f64 = num_part
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;
    if value < 0.0 {
        return Err(anyhow::anyhow!("Negative duration: {}", s));
    }

    let multiplier: u64 = match unit_part.to_lowercase().as_str() {
        "ns" => 1,
        "us" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" | "min" => 60_000_000_000,
        _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
    };

    Ok((value * multiplier as f64) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LaneConfig::default();
        assert_eq!(config.runner.replication, 20);
        assert_eq!(config.runner.repetitions, 4);
        assert_eq!(config.runner.yield_policy, YieldMode::Sleep);
        assert_eq!(config.kernels.vector_len, 2_097_152);
        assert_eq!(config.output.baseline_kind, "scalar");
        assert!(config.output.chart);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("3s").unwrap(), 3_000_000_000);
        assert_eq!(parse_duration("500ms").unwrap(), 500_000_000);
        assert_eq!(parse_duration("100us").unwrap(), 100_000);
        assert_eq!(parse_duration("1000ns").unwrap(), 1000);
        assert_eq!(parse_duration("2m").unwrap(), 120_000_000_000);
        assert_eq!(parse_duration("1.5s").unwrap(), 1_500_000_000);
        assert_eq!(parse_duration("2").unwrap(), 2_000_000_000);
        assert!(parse_duration("").is_err());
        assert!(parse_duration("5 parsecs").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            replication = 5
            seed = 7
            yield_policy = "none"

            [kernels]
            vector_len = 1024
        "#;

        let config: LaneConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.replication, 5);
        assert_eq!(config.runner.seed, Some(7));
        assert_eq!(config.runner.yield_policy, YieldMode::None);
        assert_eq!(config.kernels.vector_len, 1024);
        // Defaults should still apply
        assert_eq!(config.runner.repetitions, 4);
        assert_eq!(config.kernels.matrix_iterations, 10_000);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_default_toml_round_trips_defaults() {
        let parsed: LaneConfig = toml::from_str(&LaneConfig::default_toml()).unwrap();
        let defaults = LaneConfig::default();
        assert_eq!(parsed.runner.replication, defaults.runner.replication);
        assert_eq!(parsed.kernels, defaults.kernels);
        assert_eq!(parsed.output.directory, defaults.output.directory);
    }

    #[test]
    fn test_runner_config() {
        let mut config = LaneConfig::default();
        config.runner.yield_pause = "250us".to_string();
        let runner = config.runner_config().unwrap();
        assert_eq!(
            runner.yield_policy,
            YieldPolicy::Sleep(Duration::from_micros(250))
        );
        assert_eq!(runner.repetitions, 4);

        config.runner.repetitions = 1;
        assert!(config.runner_config().is_err());
    }

    #[test]
    fn test_runner_config_rejects_unpinnable_cpu() {
        let mut config = LaneConfig::default();
        config.runner.pin_cpu = Some(0);
        assert_eq!(config.runner_config().unwrap().pin_cpu, Some(0));

        config.runner.pin_cpu = Some(CPU_SET_CAPACITY);
        let err = config.runner_config().unwrap_err();
        assert!(err.to_string().contains("pin_cpu"));
    }
}
