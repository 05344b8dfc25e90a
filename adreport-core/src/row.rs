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

//! Aggregated and ranked output rows

use crate::key::{AggregateKey, PartitionKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sums over all records sharing one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRow {
    #[serde(flatten)]
    pub key: AggregateKey,
    pub total_clicks: u64,
    pub total_cost: Decimal,
    /// Number of input records folded into this row
    pub record_count: u64,
}

impl AggregateRow {
    pub fn empty(key: AggregateKey) -> Self {
        Self {
            key,
            total_clicks: 0,
            total_cost: Decimal::ZERO,
            record_count: 0,
        }
    }
}

/// An aggregate row with its rank inside a partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRow {
    #[serde(flatten)]
    pub row: AggregateRow,
    pub partition_key: PartitionKey,
    /// 1-based
    pub rank: u64,
}

impl RankedRow {
    pub fn key(&self) -> &AggregateKey {
        &self.row.key
    }
}
