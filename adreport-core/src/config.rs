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

//! Configuration for report engine behavior
//!
//! Controls which views run, the tie policy of each ranked view, how many
//! ranks a ranked view keeps, and whether views run in parallel.

use crate::error::{ReportError, Result};
use crate::view::{RankPolicy, ReportView};
use serde::{Deserialize, Serialize};

/// Default rank cut-off for ranked views (keep only the top campaign)
pub const DEFAULT_MAX_RANK: u64 = 1;

/// Engine configuration
///
/// The two ranked views use different tie policies by default:
/// - clicks: [`RankPolicy::Standard`] (1, 1, 3)
/// - cost: [`RankPolicy::Dense`] (1, 1, 2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tie policy of the top-campaign-by-clicks view
    pub clicks_policy: RankPolicy,

    /// Tie policy of the top-campaign-by-cost view
    pub cost_policy: RankPolicy,

    /// Ranked views keep rows with rank <= max_rank
    pub max_rank: u64,

    /// Evaluate views and ranking partitions on the rayon pool
    pub parallel: bool,

    /// Views to produce, in output order
    pub views: Vec<ReportView>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            clicks_policy: RankPolicy::Standard,
            cost_policy: RankPolicy::Dense,
            max_rank: DEFAULT_MAX_RANK,
            parallel: false,
            views: ReportView::ALL.to_vec(),
        }
    }
}

impl EngineConfig {
    /// Only the given views, everything else default
    pub fn with_views(views: impl IntoIterator<Item = ReportView>) -> Self {
        Self {
            views: views.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_rank == 0 {
            return Err(ReportError::InvalidConfig(
                "max_rank must be at least 1".to_string(),
            ));
        }
        if self.views.is_empty() {
            return Err(ReportError::InvalidConfig(
                "at least one view must be enabled".to_string(),
            ));
        }
        for (i, view) in self.views.iter().enumerate() {
            if self.views[..i].contains(view) {
                return Err(ReportError::InvalidConfig(format!(
                    "view {} listed more than once",
                    view
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.clicks_policy, RankPolicy::Standard);
        assert_eq!(config.cost_policy, RankPolicy::Dense);
        assert_eq!(config.max_rank, DEFAULT_MAX_RANK);
        assert_eq!(config.views.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_rank() {
        let config = EngineConfig {
            max_rank: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_view() {
        let config =
            EngineConfig::with_views([ReportView::DeviceClicks, ReportView::DeviceClicks]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: EngineConfig = toml::from_str(
            r#"
            cost_policy = "standard"
            views = ["device_clicks"]
            "#,
        )
        .unwrap();
        assert_eq!(config.cost_policy, RankPolicy::Standard);
        assert_eq!(config.clicks_policy, RankPolicy::Standard);
        assert_eq!(config.views, vec![ReportView::DeviceClicks]);
        assert_eq!(config.max_rank, 1);
    }
}
