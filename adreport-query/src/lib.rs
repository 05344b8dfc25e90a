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

//! Adreport Query Engine
//!
//! Aggregation, partitioning and ranking over event records, and the report
//! engine that strings them together into the named views.

pub mod aggregation;
pub mod engine;
pub mod partition;
pub mod rank;
pub mod sink;

pub use aggregation::{aggregate, aggregate_by, aggregate_par};
pub use engine::{ReportEngine, ReportRow, RunSummary, ViewOutput, MONTH_PARTITION};
pub use partition::{partition_key_of, partition_rows};
pub use rank::{rank, rank_parallel, retain_top, MetricFn, RankMetric};
pub use sink::ReportSink;
