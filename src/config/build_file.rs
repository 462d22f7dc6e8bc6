use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML build file. Every section and key is optional; anything
/// absent falls back to CLI flags or built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildFile {
    pub source: Option<SourceSection>,
    pub output: Option<OutputSection>,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSection {
    pub csv: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub script: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub enabled: Option<bool>,
}

impl BuildFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| EtlError::ConfigValidationError {
            field: "build_file".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with the matching environment variable.
    /// Unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn csv(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.csv.as_deref())
    }

    pub fn script(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.script.as_deref())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.enabled)
            .unwrap_or(false)
    }
}

impl Validate for BuildFile {
    fn validate(&self) -> Result<()> {
        if let Some(csv) = self.csv() {
            validate_non_empty_string("source.csv", csv)?;
        }
        if let Some(script) = self.script() {
            validate_non_empty_string("output.script", script)?;
        }
        Ok(())
    }
}
