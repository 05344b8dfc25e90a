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

//! Adreport Core
//!
//! Fundamental data structures for campaign performance reporting:
//! input events, grouping keys, ranking policies and the error taxonomy.

pub mod config;
pub mod error;
pub mod event;
pub mod key;
pub mod row;
pub mod view;

pub use config::{EngineConfig, DEFAULT_MAX_RANK};
pub use error::{ReportError, Result};
pub use event::{CampaignId, Device, EventRecord, RecordLocation, RecordSource};
pub use key::{AggregateKey, Dimension, DimensionValue, Grouping, PartitionKey};
pub use row::{AggregateRow, RankedRow};
pub use view::{Metric, RankPolicy, ReportView};
