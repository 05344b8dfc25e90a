// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use adreport_core::EngineConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// adreport configuration
///
/// ```toml
/// [engine]
/// max_rank = 3
/// cost_policy = "standard"
/// views = ["top_campaign_by_cost"]
///
/// [output]
/// format = "json"
///
/// [logging]
/// format = "json"
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Aligned text table per view
    #[default]
    Table,
    /// One JSON document holding every view
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CliConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Load configuration with priority: env > file > defaults
    ///
    /// Command-line flags are applied on top by the caller.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.merge_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Override fields from environment variables
    ///
    /// Supported environment variables:
    /// - ADREPORT_PARALLEL: evaluate views on the rayon pool (true/false)
    /// - ADREPORT_MAX_RANK: keep ranked rows with rank <= N
    /// - ADREPORT_OUTPUT: table or json
    /// - ADREPORT_LOG_FORMAT: text or json
    pub fn merge_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(parallel) = var("ADREPORT_PARALLEL") {
            self.engine.parallel = parallel
                .parse()
                .with_context(|| format!("ADREPORT_PARALLEL: invalid bool {:?}", parallel))?;
        }

        if let Some(max_rank) = var("ADREPORT_MAX_RANK") {
            self.engine.max_rank = max_rank
                .parse()
                .with_context(|| format!("ADREPORT_MAX_RANK: invalid number {:?}", max_rank))?;
        }

        if let Some(output) = var("ADREPORT_OUTPUT") {
            self.output.format = parse_keyword(&output).with_context(|| {
                format!("ADREPORT_OUTPUT: expected table or json, got {:?}", output)
            })?;
        }

        if let Some(format) = var("ADREPORT_LOG_FORMAT") {
            self.logging.format = parse_keyword(&format).with_context(|| {
                format!("ADREPORT_LOG_FORMAT: expected text or json, got {:?}", format)
            })?;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;

        if self.logging.level.trim().is_empty() {
            anyhow::bail!("logging.level must not be empty");
        }

        Ok(())
    }
}

/// Parse a bare snake_case keyword into a unit enum variant
fn parse_keyword<T: serde::de::DeserializeOwned>(value: &str) -> Result<T> {
    let keyword = value.trim().to_ascii_lowercase();
    Ok(serde_json::from_value(serde_json::Value::String(keyword))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adreport_core::{RankPolicy, ReportView};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config: CliConfig = toml::from_str(
            r#"
            [engine]
            max_rank = 3
            cost_policy = "standard"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.max_rank, 3);
        assert_eq!(config.engine.cost_policy, RankPolicy::Standard);
        assert_eq!(config.engine.views, ReportView::ALL.to_vec());
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config: CliConfig = toml::from_str("[engine]\nmax_rank = 3\n").unwrap();
        config
            .merge_env(env(&[
                ("ADREPORT_MAX_RANK", "5"),
                ("ADREPORT_PARALLEL", "true"),
                ("ADREPORT_OUTPUT", "JSON"),
                ("ADREPORT_LOG_FORMAT", "json"),
            ]))
            .unwrap();
        assert_eq!(config.engine.max_rank, 5);
        assert!(config.engine.parallel);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_unset_env_keeps_file_values() {
        let mut config: CliConfig = toml::from_str("[engine]\nmax_rank = 3\n").unwrap();
        config.merge_env(env(&[])).unwrap();
        assert_eq!(config.engine.max_rank, 3);
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = CliConfig::default();
        assert!(config.merge_env(env(&[("ADREPORT_MAX_RANK", "many")])).is_err());
        assert!(config.merge_env(env(&[("ADREPORT_OUTPUT", "csv")])).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_max_rank() {
        let mut config = CliConfig::default();
        config.engine.max_rank = 0;
        assert!(config.validate().is_err());
    }
}
