pub mod build_file;
#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

/// Default location of the local collection export.
pub const DEFAULT_INPUT: &str = "data/colecao.csv";
/// Default location of the generated script the site includes.
pub const DEFAULT_OUTPUT: &str = "data/collection-data.js";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "collection-etl")]
#[command(about = "Builds the static collection data script from the collection CSV export")]
pub struct CliConfig {
    /// Path to the collection CSV export (kept local only)
    #[arg(long)]
    pub csv: Option<String>,

    /// Path to write the generated collection data script
    #[arg(long)]
    pub out: Option<String>,

    /// Optional TOML build file supplying defaults for the flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system resource monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Layers flags, the optional build file and built-in defaults into a
    /// `BuildConfig`. Explicit flags win over file values, file values over
    /// defaults.
    pub fn resolve(&self) -> Result<BuildConfig> {
        let build_file = match &self.config {
            Some(path) => build_file::BuildFile::from_file(path)?,
            None => build_file::BuildFile::default(),
        };
        build_file.validate()?;

        Ok(BuildConfig {
            csv_path: self
                .csv
                .clone()
                .or_else(|| build_file.csv().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_INPUT.to_string()),
            output_path: self
                .out
                .clone()
                .or_else(|| build_file.script().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
            verbose: self.verbose,
            monitor: self.monitor || build_file.monitoring_enabled(),
        })
    }
}

/// Fully resolved run configuration, independent of where the values came
/// from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    pub csv_path: String,
    pub output_path: String,
    pub verbose: bool,
    pub monitor: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            csv_path: DEFAULT_INPUT.to_string(),
            output_path: DEFAULT_OUTPUT.to_string(),
            verbose: false,
            monitor: false,
        }
    }
}

impl ConfigProvider for BuildConfig {
    fn csv_path(&self) -> &str {
        &self.csv_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for BuildConfig {
    fn validate(&self) -> Result<()> {
        validate_path("csv", &self.csv_path)?;
        validate_path("out", &self.output_path)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli(csv: Option<&str>, out: Option<&str>, config: Option<&str>) -> CliConfig {
        CliConfig {
            csv: csv.map(str::to_string),
            out: out.map(str::to_string),
            config: config.map(str::to_string),
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_resolve_without_flags_uses_defaults() {
        let config = cli(None, None, None).resolve().unwrap();

        assert_eq!(config.csv_path, DEFAULT_INPUT);
        assert_eq!(config.output_path, DEFAULT_OUTPUT);
        assert!(!config.monitor);
    }

    #[test]
    fn test_resolve_prefers_build_file_over_defaults() {
        let mut build_file = NamedTempFile::new().unwrap();
        build_file
            .write_all(
                br#"
[source]
csv = "exports/colecao.csv"

[output]
script = "site/data/collection-data.js"

[monitoring]
enabled = true
"#,
            )
            .unwrap();

        let config = cli(None, None, build_file.path().to_str())
            .resolve()
            .unwrap();

        assert_eq!(config.csv_path, "exports/colecao.csv");
        assert_eq!(config.output_path, "site/data/collection-data.js");
        assert!(config.monitor);
    }

    #[test]
    fn test_resolve_prefers_flags_over_build_file() {
        let mut build_file = NamedTempFile::new().unwrap();
        build_file
            .write_all(
                br#"
[source]
csv = "exports/colecao.csv"
"#,
            )
            .unwrap();

        let config = cli(
            Some("override/colecao.csv"),
            Some("override/collection-data.js"),
            build_file.path().to_str(),
        )
        .resolve()
        .unwrap();

        assert_eq!(config.csv_path, "override/colecao.csv");
        assert_eq!(config.output_path, "override/collection-data.js");
    }

    #[test]
    fn test_resolve_missing_build_file_is_an_error() {
        let result = cli(None, None, Some("no/such/build-file.toml")).resolve();
        assert!(result.is_err());
    }

    #[test]
    fn test_default_build_config_validates() {
        assert!(BuildConfig::default().validate().is_ok());
    }
}
