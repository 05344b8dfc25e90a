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


//! The `report` command: read records, run the engine, write every view

use crate::config::{CliConfig, OutputFormat};
use crate::sink::{JsonSink, TableSink};
use crate::source::{DateRange, JsonFileSource};
use adreport_core::RecordSource;
use adreport_query::{ReportEngine, RunSummary};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

/// Run every configured view over the records in `input` and write them to
/// `out` in the configured format.
///
/// View failures are logged and returned in the summary; reading the input
/// or writing the output aborts with an error.
pub fn run_report<W: Write>(
    input: &Path,
    range: DateRange,
    config: &CliConfig,
    out: W,
) -> Result<RunSummary> {
    config.validate().context("Invalid configuration")?;
    let engine = ReportEngine::try_new(config.engine.clone()).context("Invalid configuration")?;

    let start = Instant::now();
    let records = JsonFileSource::new(input)
        .with_range(range)
        .read_records()
        .with_context(|| format!("Failed to read records from {:?}", input))?;
    info!(records = records.len(), "Loaded records");

    let summary = match config.output.format {
        OutputFormat::Table => engine.run_into(&records, &mut TableSink::new(out)),
        OutputFormat::Json => engine.run_into(&records, &mut JsonSink::new(out)),
    }
    .context("Failed to write report")?;

    for failure in &summary.failed {
        error!(error = %failure, "View failed");
    }
    info!(
        emitted = summary.emitted.len(),
        failed = summary.failed.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Report complete"
    );
    Ok(summary)
}
