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

//! Report views, ranking metrics and tie policies

use crate::row::AggregateRow;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four named report views
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportView {
    /// Clicks and cost per (date, campaign)
    DailyPerformance,
    /// Most-clicked campaign per month
    TopCampaignByClicks,
    /// Most expensive campaign per month
    TopCampaignByCost,
    /// Clicks per (campaign, device)
    DeviceClicks,
}

impl ReportView {
    pub const ALL: [ReportView; 4] = [
        ReportView::DailyPerformance,
        ReportView::TopCampaignByClicks,
        ReportView::TopCampaignByCost,
        ReportView::DeviceClicks,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReportView::DailyPerformance => "daily_performance",
            ReportView::TopCampaignByClicks => "top_campaign_by_clicks",
            ReportView::TopCampaignByCost => "top_campaign_by_cost",
            ReportView::DeviceClicks => "device_clicks",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportView::DailyPerformance => "Daily campaign performance",
            ReportView::TopCampaignByClicks => "Top campaign by clicks per month",
            ReportView::TopCampaignByCost => "Top campaign by cost per month",
            ReportView::DeviceClicks => "Clicks by campaign and device",
        }
    }
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        ReportView::ALL
            .into_iter()
            .find(|view| view.name() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown view: {} (expected one of: {})",
                    s,
                    ReportView::ALL.map(|v| v.name()).join(", ")
                )
            })
    }
}

/// Tie policy for ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankPolicy {
    /// Competition ranking: ties share a rank, later ranks skip (1, 1, 3)
    Standard,
    /// Ties share a rank, no gaps (1, 1, 2)
    Dense,
}

impl fmt::Display for RankPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankPolicy::Standard => f.write_str("standard"),
            RankPolicy::Dense => f.write_str("dense"),
        }
    }
}

/// Numeric metric a ranking orders by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TotalClicks,
    TotalCost,
}

impl Metric {
    /// Metric value of a row as an exact decimal.
    ///
    /// Clicks fit losslessly: a `Decimal` mantissa is 96 bits wide.
    pub fn value_of(&self, row: &AggregateRow) -> Option<Decimal> {
        match self {
            Metric::TotalClicks => Some(Decimal::from(row.total_clicks)),
            Metric::TotalCost => Some(row.total_cost),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::TotalClicks => f.write_str("total_clicks"),
            Metric::TotalCost => f.write_str("total_cost"),
        }
    }
}
