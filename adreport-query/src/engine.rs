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

//! Report engine
//!
//! Builds the four report views from one immutable record set:
//!
//! | view | grouping | ranking | order |
//! |------|----------|---------|-------|
//! | daily_performance | (date, campaign) | - | (date, campaign) |
//! | top_campaign_by_clicks | (year, month, campaign) | clicks, per month | (year, month, rank) |
//! | top_campaign_by_cost | (year, month, campaign) | cost, per month | (year, month, rank) |
//! | device_clicks | (campaign, device) | - | (campaign, device) |
//!
//! Views share nothing but the input slice, so each one fails or succeeds on
//! its own.

use crate::aggregation::{aggregate_by, aggregate_par};
use crate::partition::partition_key_of;
use crate::rank::{rank, rank_parallel, retain_top};
use crate::sink::ReportSink;
use adreport_core::{
    AggregateRow, Dimension, EngineConfig, EventRecord, Grouping, Metric, RankPolicy, RankedRow,
    ReportError, ReportView, Result,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Ranked views rank campaigns within a calendar month
pub const MONTH_PARTITION: [Dimension; 2] = [Dimension::Year, Dimension::Month];

/// One output row of a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportRow {
    Ranked(RankedRow),
    Aggregate(AggregateRow),
}

impl ReportRow {
    pub fn aggregate(&self) -> &AggregateRow {
        match self {
            ReportRow::Aggregate(row) => row,
            ReportRow::Ranked(ranked) => &ranked.row,
        }
    }

    pub fn rank(&self) -> Option<u64> {
        match self {
            ReportRow::Aggregate(_) => None,
            ReportRow::Ranked(ranked) => Some(ranked.rank),
        }
    }
}

/// Finished view, rows in final order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOutput {
    pub view: ReportView,
    pub rows: Vec<ReportRow>,
}

/// Outcome of [`ReportEngine::run_into`]
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Views handed to the sink, in order
    pub emitted: Vec<ReportView>,
    /// Views that failed, each error scoped with its view
    pub failed: Vec<ReportError>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Stateless report builder
///
/// Holds only its configuration; every call takes the record set for that
/// run, so one engine can serve any number of runs.
#[derive(Debug, Clone, Default)]
pub struct ReportEngine {
    config: EngineConfig,
}

impl ReportEngine {
    /// Engine over `config` as given. Ranked views still refuse a zero
    /// `max_rank` when they run; use [`ReportEngine::try_new`] to reject a bad
    /// configuration up front.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Validate `config` and build an engine over it
    pub fn try_new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Clicks and cost per (date, campaign), ascending by (date, campaign)
    pub fn daily_performance(&self, records: &[EventRecord]) -> Result<Vec<AggregateRow>> {
        self.sorted_aggregate(records, Grouping::Daily)
    }

    /// Best campaigns by clicks per month
    pub fn top_campaign_by_clicks(&self, records: &[EventRecord]) -> Result<Vec<RankedRow>> {
        self.top_campaign(records, Metric::TotalClicks, self.config.clicks_policy)
    }

    /// Best campaigns by cost per month
    pub fn top_campaign_by_cost(&self, records: &[EventRecord]) -> Result<Vec<RankedRow>> {
        self.top_campaign(records, Metric::TotalCost, self.config.cost_policy)
    }

    /// Clicks per (campaign, device), ascending by (campaign, device)
    pub fn device_clicks(&self, records: &[EventRecord]) -> Result<Vec<AggregateRow>> {
        self.sorted_aggregate(records, Grouping::Device)
    }

    /// Build one view. Errors carry the view they came from.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn run_view(&self, view: ReportView, records: &[EventRecord]) -> Result<ViewOutput> {
        let rows = match view {
            ReportView::DailyPerformance => into_rows(self.daily_performance(records)),
            ReportView::TopCampaignByClicks => into_ranked(self.top_campaign_by_clicks(records)),
            ReportView::TopCampaignByCost => into_ranked(self.top_campaign_by_cost(records)),
            ReportView::DeviceClicks => into_rows(self.device_clicks(records)),
        }
        .map_err(|e| e.in_view(view))?;

        info!(view = %view, rows = rows.len(), "View complete");
        Ok(ViewOutput { view, rows })
    }

    /// Build every enabled view, in configured order.
    ///
    /// A failing view does not stop the others; its slot holds the error.
    pub fn run_all(&self, records: &[EventRecord]) -> Vec<(ReportView, Result<ViewOutput>)> {
        let results: Vec<(ReportView, Result<ViewOutput>)> = if self.config.parallel {
            self.config
                .views
                .par_iter()
                .map(|view| (*view, self.run_view(*view, records)))
                .collect()
        } else {
            self.config
                .views
                .iter()
                .map(|view| (*view, self.run_view(*view, records)))
                .collect()
        };

        for (view, result) in &results {
            if let Err(e) = result {
                warn!(view = %view, error = %e, "View failed");
            }
        }
        results
    }

    /// Build every enabled view and hand the successful ones to `sink`.
    ///
    /// View failures are collected in the summary; only sink errors abort
    /// the run.
    pub fn run_into<S>(&self, records: &[EventRecord], sink: &mut S) -> Result<RunSummary>
    where
        S: ReportSink + ?Sized,
    {
        let mut summary = RunSummary::default();
        for (view, result) in self.run_all(records) {
            match result {
                Ok(output) => {
                    sink.emit(&output)?;
                    summary.emitted.push(view);
                }
                Err(e) => summary.failed.push(e),
            }
        }
        sink.finish()?;
        Ok(summary)
    }

    fn sorted_aggregate(
        &self,
        records: &[EventRecord],
        grouping: Grouping,
    ) -> Result<Vec<AggregateRow>> {
        let mut rows = self.aggregate(records, grouping)?;
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(rows)
    }

    fn top_campaign(
        &self,
        records: &[EventRecord],
        metric: Metric,
        policy: RankPolicy,
    ) -> Result<Vec<RankedRow>> {
        if self.config.max_rank == 0 {
            return Err(ReportError::InvalidConfig(
                "max_rank must be at least 1".to_string(),
            ));
        }
        let rows = self.aggregate(records, Grouping::Monthly)?;
        let by_month = |row: &AggregateRow| partition_key_of(row, &MONTH_PARTITION);

        let ranked = if self.config.parallel {
            rank_parallel(rows, by_month, &metric, policy)?
        } else {
            rank(rows, by_month, &metric, policy)?
        };
        debug!(metric = %metric, policy = %policy, ranked = ranked.len(), "Ranked monthly rows");

        // ranked output is already ordered by (year, month, rank, campaign)
        Ok(retain_top(ranked, self.config.max_rank))
    }

    fn aggregate(&self, records: &[EventRecord], grouping: Grouping) -> Result<Vec<AggregateRow>> {
        let rows = if self.config.parallel {
            aggregate_par(records, |record| grouping.key_of(record))?
        } else {
            aggregate_by(records, grouping)?
        };
        debug!(?grouping, groups = rows.len(), "Aggregated records");
        Ok(rows)
    }
}

fn into_rows(rows: Result<Vec<AggregateRow>>) -> Result<Vec<ReportRow>> {
    rows.map(|rows| rows.into_iter().map(ReportRow::Aggregate).collect())
}

fn into_ranked(rows: Result<Vec<RankedRow>>) -> Result<Vec<ReportRow>> {
    rows.map(|rows| rows.into_iter().map(ReportRow::Ranked).collect())
}
