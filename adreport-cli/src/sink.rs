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

//! Report output: aligned text tables or a single JSON document

use adreport_core::Result;
use adreport_query::{ReportRow, ReportSink, ViewOutput};
use serde::Serialize;
use std::io::Write;

/// Writes each view as an aligned text table
pub struct TableSink<W: Write> {
    writer: W,
    views: usize,
}

impl<W: Write> TableSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, views: 0 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for TableSink<W> {
    fn emit(&mut self, output: &ViewOutput) -> Result<()> {
        if self.views > 0 {
            writeln!(self.writer)?;
        }
        self.views += 1;

        writeln!(self.writer, "== {} ==", output.view.title())?;
        if output.rows.is_empty() {
            writeln!(self.writer, "(no rows)")?;
            return Ok(());
        }

        let header = header_of(&output.rows[0]);
        let cells: Vec<Vec<String>> = output.rows.iter().map(cells_of).collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        write_line(&mut self.writer, &header, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(&mut self.writer, &rule, &widths)?;
        for row in &cells {
            write_line(&mut self.writer, row, &widths)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn header_of(row: &ReportRow) -> Vec<String> {
    let mut header: Vec<String> = row
        .aggregate()
        .key
        .grouping()
        .dimensions()
        .iter()
        .map(|d| d.to_string())
        .collect();
    header.push("total_clicks".to_string());
    header.push("total_cost".to_string());
    if row.rank().is_some() {
        header.push("rank".to_string());
    }
    header
}

fn cells_of(row: &ReportRow) -> Vec<String> {
    let agg = row.aggregate();
    let mut cells: Vec<String> = agg
        .key
        .grouping()
        .dimensions()
        .iter()
        .filter_map(|d| agg.key.dimension(*d))
        .map(|value| value.to_string())
        .collect();
    cells.push(agg.total_clicks.to_string());
    cells.push(agg.total_cost.to_string());
    if let Some(rank) = row.rank() {
        cells.push(rank.to_string());
    }
    cells
}

fn write_line<W: Write>(writer: &mut W, cells: &[String], widths: &[usize]) -> std::io::Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    writeln!(writer, "{}", line.join("  ").trim_end())
}

#[derive(Serialize)]
struct Document<'a> {
    views: &'a [ViewOutput],
}

/// Buffers every view and writes one JSON document on finish
pub struct JsonSink<W: Write> {
    writer: W,
    views: Vec<ViewOutput>,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            views: Vec::new(),
            pretty: true,
        }
    }

    /// Single-line output
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn emit(&mut self, output: &ViewOutput) -> Result<()> {
        self.views.push(output.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let document = Document { views: &self.views };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &document)?;
        } else {
            serde_json::to_writer(&mut self.writer, &document)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
