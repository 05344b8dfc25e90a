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

//! Partitioning of aggregate rows by a coarser key

use adreport_core::{AggregateRow, Dimension, PartitionKey, ReportError, Result};
use std::collections::BTreeMap;

/// Extract the sub-tuple of `row.key` named by `fields`, in that order.
///
/// Only the key is inspected, never the totals. A field the key does not
/// carry is a configuration error.
pub fn partition_key_of(row: &AggregateRow, fields: &[Dimension]) -> Result<PartitionKey> {
    fields
        .iter()
        .map(|dimension| {
            row.key
                .dimension(*dimension)
                .ok_or_else(|| ReportError::InvalidGrouping {
                    dimension: *dimension,
                    key: row.key.clone(),
                })
        })
        .collect::<Result<Vec<_>>>()
        .map(PartitionKey)
}

/// Bucket rows by their partition key; partitions iterate in key order.
pub fn partition_rows(
    rows: Vec<AggregateRow>,
    fields: &[Dimension],
) -> Result<BTreeMap<PartitionKey, Vec<AggregateRow>>> {
    let mut partitions: BTreeMap<PartitionKey, Vec<AggregateRow>> = BTreeMap::new();
    for row in rows {
        let key = partition_key_of(&row, fields)?;
        partitions.entry(key).or_default().push(row);
    }
    Ok(partitions)
}
