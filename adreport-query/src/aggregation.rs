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

//! Sum aggregation over event records
//!
//! Records are folded into one [`AggregateRow`] per distinct key. Sums are
//! checked: clicks accumulate in `u64` and cost in `Decimal`, and an overflow
//! surfaces as [`ReportError::Overflow`] instead of wrapping. A cost sum that
//! would need more than the 28 digits `Decimal` carries is an overflow too,
//! since `Decimal` would otherwise round the smaller addend away.

use adreport_core::{AggregateKey, AggregateRow, EventRecord, Grouping, ReportError, Result};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Records per rayon task in [`aggregate_par`]
pub const PARALLEL_CHUNK_SIZE: usize = 4096;

type GroupMap = HashMap<AggregateKey, AggregateRow>;

/// Group records by `key_fn` and sum clicks and cost per group.
///
/// Output order is unspecified.
pub fn aggregate<'a, I, F>(records: I, key_fn: F) -> Result<Vec<AggregateRow>>
where
    I: IntoIterator<Item = &'a EventRecord>,
    F: Fn(&EventRecord) -> AggregateKey,
{
    let groups = fold_records(records, &key_fn)?;
    Ok(groups.into_values().collect())
}

/// [`aggregate`] with one of the standard groupings
pub fn aggregate_by<'a, I>(records: I, grouping: Grouping) -> Result<Vec<AggregateRow>>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    aggregate(records, |record| grouping.key_of(record))
}

/// Parallel [`aggregate`]: chunks are folded on the rayon pool and the
/// partial groups merged. Produces the same rows as the sequential path.
pub fn aggregate_par<F>(records: &[EventRecord], key_fn: F) -> Result<Vec<AggregateRow>>
where
    F: Fn(&EventRecord) -> AggregateKey + Sync,
{
    let groups = records
        .par_chunks(PARALLEL_CHUNK_SIZE)
        .map(|chunk| fold_records(chunk, &key_fn))
        .try_reduce(GroupMap::new, merge_groups)?;
    Ok(groups.into_values().collect())
}

fn fold_records<'a, I, F>(records: I, key_fn: &F) -> Result<GroupMap>
where
    I: IntoIterator<Item = &'a EventRecord>,
    F: Fn(&EventRecord) -> AggregateKey,
{
    let mut groups = GroupMap::new();
    for record in records {
        let row = groups
            .entry(key_fn(record))
            .or_insert_with_key(|key| AggregateRow::empty(key.clone()));
        add_record(row, record)?;
    }
    Ok(groups)
}

fn add_record(row: &mut AggregateRow, record: &EventRecord) -> Result<()> {
    row.total_clicks = row
        .total_clicks
        .checked_add(record.clicks)
        .ok_or_else(|| overflow("total_clicks", &row.key))?;
    row.total_cost = exact_add(row.total_cost, record.cost)
        .ok_or_else(|| overflow("total_cost", &row.key))?;
    row.record_count += 1;
    Ok(())
}

fn merge_groups(mut into: GroupMap, from: GroupMap) -> Result<GroupMap> {
    for (key, partial) in from {
        match into.get_mut(&key) {
            Some(row) => {
                row.total_clicks = row
                    .total_clicks
                    .checked_add(partial.total_clicks)
                    .ok_or_else(|| overflow("total_clicks", &key))?;
                row.total_cost = exact_add(row.total_cost, partial.total_cost)
                    .ok_or_else(|| overflow("total_cost", &key))?;
                row.record_count += partial.record_count;
            }
            None => {
                into.insert(key, partial);
            }
        }
    }
    Ok(into)
}

/// `a + b`, or `None` when the sum overflows or had to be rounded to fit.
///
/// `Decimal` keeps the larger operand scale when the sum fits and drops
/// fractional digits otherwise. Dropping digits is lossless only when both
/// operands are already representable at the reduced scale.
fn exact_add(a: Decimal, b: Decimal) -> Option<Decimal> {
    let sum = a.checked_add(b)?;
    let scale = sum.scale();
    if scale >= a.scale().max(b.scale()) {
        return Some(sum);
    }
    (a.round_dp(scale) == a && b.round_dp(scale) == b).then_some(sum)
}

fn overflow(field: &'static str, key: &AggregateKey) -> ReportError {
    ReportError::Overflow {
        field,
        key: key.clone(),
    }
}
