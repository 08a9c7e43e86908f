//! Configuration loading from perftester.toml
//!
//! Perftester settings can be kept in a `perftester.toml` file. The file is
//! discovered by walking up from the current directory; command-line flags
//! override whatever it sets.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "perftester.toml";

/// Perftester configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PerfConfig {
    /// Trial configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Input generator configuration
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Trial configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Number of trials per comparison
    #[serde(default = "default_num_tests")]
    pub num_tests: usize,
    /// Directory that relative program paths are resolved against
    #[serde(default)]
    pub program_dir: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            num_tests: default_num_tests(),
            program_dir: None,
        }
    }
}

fn default_num_tests() -> usize {
    100
}

/// Random input range, `[min, max)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Inclusive lower bound
    #[serde(default = "default_min")]
    pub min: u64,
    /// Exclusive upper bound
    #[serde(default = "default_max")]
    pub max: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
        }
    }
}

fn default_min() -> u64 {
    100_000
}
fn default_max() -> u64 {
    100_000_000
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "table", "json" or "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Clear the terminal before printing the table
    #[serde(default = "default_clear_screen")]
    pub clear_screen: bool,
    /// Extra metrics after the defaults, e.g. "median" or "p95"
    #[serde(default)]
    pub metrics: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            clear_screen: default_clear_screen(),
            metrics: Vec::new(),
        }
    }
}

fn default_format() -> String {
    "table".to_string()
}
fn default_clear_screen() -> bool {
    true
}

impl PerfConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(dir)
    }

    /// Walk up from `dir` looking for `perftester.toml`
    ///
    /// A file that fails to parse is reported and ignored.
    pub fn discover_from(mut dir: PathBuf) -> Option<Self> {
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        warn!(path = %config_path.display(), "Ignoring config file: {e}");
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Perftester Configuration

[runner]
# Trials per comparison
num_tests = 100
# Directory for relative program paths (uncomment to enable)
# program_dir = "target/release"

[generator]
# Random integer inputs are drawn from [min, max)
min = 100000
max = 100000000

[output]
# Output format: table, json, csv
format = "table"
# Clear the terminal before printing the table
clear_screen = true
# Extra metrics: "median" or percentiles such as "p95"
metrics = []
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PerfConfig::default();
        assert_eq!(config.runner.num_tests, 100);
        assert_eq!(config.runner.program_dir, None);
        assert_eq!(config.generator.min, 100_000);
        assert_eq!(config.generator.max, 100_000_000);
        assert_eq!(config.output.format, "table");
        assert!(config.output.clear_screen);
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            num_tests = 25
            program_dir = "bin"

            [output]
            metrics = ["median", "p99"]
        "#;

        let config: PerfConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.num_tests, 25);
        assert_eq!(config.runner.program_dir, Some(PathBuf::from("bin")));
        assert_eq!(config.output.metrics, vec!["median", "p99"]);
        // Defaults should still apply
        assert_eq!(config.generator.max, 100_000_000);
        assert_eq!(config.output.format, "table");
    }

    #[test]
    fn test_default_toml_parses() {
        let config: PerfConfig = toml::from_str(&PerfConfig::default_toml()).unwrap();
        assert_eq!(config.runner.num_tests, 100);
        assert_eq!(config.generator.min, 100_000);
        assert!(config.output.metrics.is_empty());
    }

    #[test]
    fn test_discover_walks_up() {
        let root = std::env::temp_dir().join(format!("perftester-config-{}", std::process::id()));
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join(CONFIG_FILE), "[runner]\nnum_tests = 7\n").unwrap();

        let config = PerfConfig::discover_from(nested).unwrap();
        assert_eq!(config.runner.num_tests, 7);

        std::fs::write(root.join(CONFIG_FILE), "[runner]\nnum_tests = \"x\"\n").unwrap();
        assert!(PerfConfig::discover_from(root.clone()).is_none());

        std::fs::remove_dir_all(&root).unwrap();
    }
}
