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

//! Event records from JSON files
//!
//! Two layouts are accepted, detected from the first non-blank character:
//! a JSON array of records (`[`), or JSON lines with one record per line.
//! Either way a record that fails to parse or validate is reported as
//! [`ReportError::InvalidRecord`] with its line or array element.

use adreport_core::{EventRecord, RecordLocation, RecordSource, ReportError, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::debug;

/// Inclusive date window; an open end is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ReportError::InvalidConfig(format!(
                    "date range is empty: {} is after {}",
                    from, to
                )));
            }
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Reads and validates records from one JSON or JSON-lines file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    range: DateRange,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            range: DateRange::default(),
        }
    }

    /// Keep only records dated inside `range`
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }
}

impl RecordSource for JsonFileSource {
    fn read_records(&mut self) -> Result<Vec<EventRecord>> {
        let content = std::fs::read_to_string(&self.path)?;
        let parsed = parse_records(&content)?;
        let total = parsed.len();

        let records: Vec<EventRecord> = parsed
            .into_iter()
            .filter(|record| self.range.contains(record.date))
            .collect();

        debug!(
            path = ?self.path,
            read = total,
            kept = records.len(),
            "Loaded event records"
        );
        Ok(records)
    }
}

/// Parse and validate records from either layout.
///
/// Validation runs before date filtering, so a bad record fails the read even
/// when it lies outside the requested window.
pub fn parse_records(content: &str) -> Result<Vec<EventRecord>> {
    let records = if content.trim_start().starts_with('[') {
        // malformed JSON has no element to point at, only a line
        let values: Vec<serde_json::Value> = serde_json::from_str(content)
            .map_err(|e| invalid_record(RecordLocation::Line(e.line()), e))?;
        let mut records = Vec::with_capacity(values.len());
        for (i, value) in values.into_iter().enumerate() {
            let location = RecordLocation::Element(i + 1);
            let record: EventRecord =
                serde_json::from_value(value).map_err(|e| invalid_record(location, e))?;
            record.validate(location)?;
            records.push(record);
        }
        records
    } else {
        let mut records = Vec::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let location = RecordLocation::Line(i + 1);
            let record: EventRecord =
                serde_json::from_str(line).map_err(|e| invalid_record(location, e))?;
            record.validate(location)?;
            records.push(record);
        }
        records
    };
    Ok(records)
}

fn invalid_record(location: RecordLocation, e: serde_json::Error) -> ReportError {
    ReportError::InvalidRecord {
        location,
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_json_lines() {
        let content = concat!(
            r#"{"date":"2024-01-01","campaign_id":"C1","device":"desktop","clicks":10,"cost":"5.0"}"#,
            "\n\n",
            r#"{"date":"2024-01-02","campaign_id":"C2","device":"mobile","clicks":3,"cost":1.25}"#,
            "\n",
        );
        let records = parse_records(content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cost, dec!(5.0));
        assert_eq!(records[1].cost, dec!(1.25));
    }

    #[test]
    fn test_parse_json_array() {
        let content = r#"
            [
              {"date":"2024-01-01","campaign_id":"C1","device":"desktop","clicks":10,"cost":"5.0"}
            ]"#;
        let records = parse_records(content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].campaign_id.as_str(), "C1");
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let content = concat!(
            r#"{"date":"2024-01-01","campaign_id":"C1","device":"desktop","clicks":10,"cost":"5.0"}"#,
            "\n",
            r#"{"date":"2024-01-01","campaign_id":"C1","device":"desktop","clicks":-1,"cost":"5.0"}"#,
        );
        let err = parse_records(content).unwrap_err();
        assert!(matches!(
            err,
            ReportError::InvalidRecord {
                location: RecordLocation::Line(2),
                ..
            }
        ));
    }

    #[test]
    fn test_bad_array_element_reports_element() {
        let content = r#"[
            {"date":"2024-01-01","campaign_id":"C1","device":"desktop","clicks":10,"cost":"5.0"},
            {"date":"2024-01-01","campaign_id":"C1","device":"desktop","clicks":-1,"cost":"5.0"}
        ]"#;
        let err = parse_records(content).unwrap_err();
        assert!(matches!(
            err,
            ReportError::InvalidRecord {
                location: RecordLocation::Element(2),
                ..
            }
        ));
        assert!(err.to_string().contains("element 2"), "{}", err);
    }

    #[test]
    fn test_invalid_array_element_reports_element() {
        let content = r#"[
            {"date":"2024-01-01","campaign_id":"","device":"desktop","clicks":1,"cost":"1"}
        ]"#;
        let err = parse_records(content).unwrap_err();
        assert!(matches!(
            err,
            ReportError::InvalidRecord {
                location: RecordLocation::Element(1),
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_array_reports_line() {
        let content = "[\n  {\"date\": \"2024-01-01\",\n  oops\n]";
        let err = parse_records(content).unwrap_err();
        assert!(matches!(
            err,
            ReportError::InvalidRecord {
                location: RecordLocation::Line(3),
                ..
            }
        ));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let content =
            r#"{"date":"2024-01-01","campaign_id":"C1","device":"desktop","clicks":1,"cost":"-2"}"#;
        let err = parse_records(content).unwrap_err();
        assert!(matches!(
            err,
            ReportError::InvalidRecord {
                location: RecordLocation::Line(1),
                ..
            }
        ));
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::new(Some(date(2024, 1, 2)), Some(date(2024, 1, 3))).unwrap();
        assert!(!range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 2)));
        assert!(range.contains(date(2024, 1, 3)));
        assert!(!range.contains(date(2024, 1, 4)));
        assert!(DateRange::default().contains(date(1999, 12, 31)));
        assert!(DateRange::new(Some(date(2024, 2, 1)), Some(date(2024, 1, 1))).is_err());
    }

    #[test]
    fn test_file_source_filters_by_range() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for day in 1..=5 {
            writeln!(
                file,
                r#"{{"date":"2024-01-0{}","campaign_id":"C1","device":"desktop","clicks":1,"cost":"1"}}"#,
                day
            )
            .unwrap();
        }

        let range = DateRange::new(Some(date(2024, 1, 2)), Some(date(2024, 1, 4))).unwrap();
        let mut source = JsonFileSource::new(file.path()).with_range(range);
        let records = source.read_records().unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut source = JsonFileSource::new("/nonexistent/adreport/records.jsonl");
        assert!(matches!(source.read_records(), Err(ReportError::Io(_))));
    }
}
