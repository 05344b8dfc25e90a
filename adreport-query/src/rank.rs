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

//! Ranking within partitions
//!
//! Rows are split into partitions, each partition is ordered by its metric
//! descending, and ranks are assigned under a [`RankPolicy`]:
//!
//! - `Standard`: rank = 1 + rows with a strictly greater metric (1, 1, 3)
//! - `Dense`: rank = 1 + distinct metric values strictly greater (1, 1, 2)
//!
//! Equal metrics always share a rank. Inside a tie rows are ordered by
//! ascending key so the output never depends on input order.
//!
//! Output order: partition key ascending, then rank, then key.

use adreport_core::{
    AggregateRow, Metric, PartitionKey, RankPolicy, RankedRow, ReportError, Result,
};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A numeric value to rank rows by
pub trait RankMetric {
    /// Name used in error messages
    fn name(&self) -> String;

    /// `None` when the metric is undefined for the row
    fn value_of(&self, row: &AggregateRow) -> Option<Decimal>;
}

impl RankMetric for Metric {
    fn name(&self) -> String {
        self.to_string()
    }

    fn value_of(&self, row: &AggregateRow) -> Option<Decimal> {
        Metric::value_of(self, row)
    }
}

/// Ad-hoc metric from a closure
pub struct MetricFn<F> {
    pub name: &'static str,
    pub f: F,
}

impl<F> RankMetric for MetricFn<F>
where
    F: Fn(&AggregateRow) -> Option<Decimal>,
{
    fn name(&self) -> String {
        self.name.to_string()
    }

    fn value_of(&self, row: &AggregateRow) -> Option<Decimal> {
        (self.f)(row)
    }
}

type Partitions = BTreeMap<PartitionKey, Vec<(Decimal, AggregateRow)>>;

/// Rank `rows` within the partitions produced by `partition_key_fn`.
///
/// Fails with [`ReportError::InvalidMetric`] if the metric is undefined for
/// any row, or with whatever `partition_key_fn` returns. Empty input yields
/// no rows.
pub fn rank<P, M>(
    rows: Vec<AggregateRow>,
    partition_key_fn: P,
    metric: &M,
    policy: RankPolicy,
) -> Result<Vec<RankedRow>>
where
    P: Fn(&AggregateRow) -> Result<PartitionKey>,
    M: RankMetric + ?Sized,
{
    let partitions = split(rows, partition_key_fn, metric)?;
    Ok(partitions
        .into_iter()
        .flat_map(|(key, entries)| rank_partition(key, entries, policy))
        .collect())
}

/// [`rank`] with partitions ranked on the rayon pool.
///
/// Partitions are disjoint, and results are collected in partition order,
/// so the output is identical to the sequential path.
pub fn rank_parallel<P, M>(
    rows: Vec<AggregateRow>,
    partition_key_fn: P,
    metric: &M,
    policy: RankPolicy,
) -> Result<Vec<RankedRow>>
where
    P: Fn(&AggregateRow) -> Result<PartitionKey>,
    M: RankMetric + ?Sized,
{
    let partitions: Vec<_> = split(rows, partition_key_fn, metric)?.into_iter().collect();
    let ranked: Vec<Vec<RankedRow>> = partitions
        .into_par_iter()
        .map(|(key, entries)| rank_partition(key, entries, policy))
        .collect();
    Ok(ranked.into_iter().flatten().collect())
}

/// Keep rows ranked `max_rank` or better. Every row tied at a kept rank is
/// kept, so ties at rank 1 all survive a `max_rank` of 1.
pub fn retain_top(mut rows: Vec<RankedRow>, max_rank: u64) -> Vec<RankedRow> {
    rows.retain(|row| row.rank <= max_rank);
    rows
}

fn split<P, M>(rows: Vec<AggregateRow>, partition_key_fn: P, metric: &M) -> Result<Partitions>
where
    P: Fn(&AggregateRow) -> Result<PartitionKey>,
    M: RankMetric + ?Sized,
{
    let mut partitions = Partitions::new();
    for row in rows {
        let value = metric
            .value_of(&row)
            .ok_or_else(|| ReportError::InvalidMetric {
                metric: metric.name(),
                key: row.key.clone(),
            })?;
        let key = partition_key_fn(&row)?;
        partitions.entry(key).or_default().push((value, row));
    }
    Ok(partitions)
}

fn rank_partition(
    partition_key: PartitionKey,
    mut entries: Vec<(Decimal, AggregateRow)>,
    policy: RankPolicy,
) -> Vec<RankedRow> {
    entries.sort_by(|(value_a, row_a), (value_b, row_b)| {
        value_b.cmp(value_a).then_with(|| row_a.key.cmp(&row_b.key))
    });

    let mut ranked = Vec::with_capacity(entries.len());
    let mut previous: Option<Decimal> = None;
    let mut standard = 0u64;
    let mut dense = 0u64;

    for (position, (value, row)) in entries.into_iter().enumerate() {
        if previous != Some(value) {
            standard = position as u64 + 1;
            dense += 1;
            previous = Some(value);
        }
        let rank = match policy {
            RankPolicy::Standard => standard,
            RankPolicy::Dense => dense,
        };
        ranked.push(RankedRow {
            row,
            partition_key: partition_key.clone(),
            rank,
        });
    }

    ranked
}
