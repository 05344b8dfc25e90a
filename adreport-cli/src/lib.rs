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


//! adreport command-line support
//!
//! Configuration loading, logging setup, the JSON record source, the
//! table and JSON sinks, and the sample data generator behind the
//! `adreport` binary.

pub mod config;
pub mod generate;
pub mod logging;
pub mod report;
pub mod sink;
pub mod source;

pub use config::{CliConfig, LogFormat, LoggingConfig, OutputConfig, OutputFormat};
pub use generate::{sample_records, write_json_lines, SampleSpec};
pub use logging::init_logging;
pub use report::run_report;
pub use sink::{JsonSink, TableSink};
pub use source::{parse_records, DateRange, JsonFileSource};
