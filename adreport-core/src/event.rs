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

//! Ad-delivery event records
//!
//! An [`EventRecord`] is one day of delivery for one campaign on one device.
//! Records are immutable once read; every reporting stage borrows them.

use crate::error::{ReportError, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Campaign identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(pub String);

impl CampaignId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CampaignId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Delivery device (desktop, mobile, tablet, ...)
///
/// Kept as a free-form label: sources report whatever device taxonomy they
/// have, and the device view sorts labels lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Device(pub String);

impl Device {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Device {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Where a record sits in its source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLocation {
    /// 1-based line of a JSON-lines file
    Line(usize),
    /// 1-based element of a JSON array
    Element(usize),
}

impl fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordLocation::Line(n) => write!(f, "line {}", n),
            RecordLocation::Element(n) => write!(f, "element {}", n),
        }
    }
}

/// One ad-delivery event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: NaiveDate,
    pub campaign_id: CampaignId,
    pub device: Device,
    pub clicks: u64,
    pub cost: Decimal,
}

impl EventRecord {
    pub fn new(
        date: NaiveDate,
        campaign_id: impl Into<CampaignId>,
        device: impl Into<Device>,
        clicks: u64,
        cost: Decimal,
    ) -> Self {
        Self {
            date,
            campaign_id: campaign_id.into(),
            device: device.into(),
            clicks,
            cost,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Check collaborator-side invariants.
    ///
    /// Clicks are unsigned by construction, so only the cost sign and the
    /// identifier need checking. `location` is only used for the error
    /// message.
    pub fn validate(&self, location: RecordLocation) -> Result<()> {
        if self.cost < Decimal::ZERO {
            return Err(ReportError::InvalidRecord {
                location,
                reason: format!("negative cost {} for campaign {}", self.cost, self.campaign_id),
            });
        }
        if self.campaign_id.0.trim().is_empty() {
            return Err(ReportError::InvalidRecord {
                location,
                reason: "empty campaign_id".to_string(),
            });
        }
        Ok(())
    }
}

impl From<String> for CampaignId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<String> for Device {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Supplies the raw event records for one reporting run.
///
/// Implementations own the storage format; the engine only ever sees the
/// returned records.
pub trait RecordSource {
    fn read_records(&mut self) -> Result<Vec<EventRecord>>;
}

impl RecordSource for Vec<EventRecord> {
    fn read_records(&mut self) -> Result<Vec<EventRecord>> {
        Ok(std::mem::take(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_month_projection() {
        let record = EventRecord::new(date(2024, 3, 17), "C1", "desktop", 3, dec!(1.5));
        assert_eq!(record.year(), 2024);
        assert_eq!(record.month(), 3);
    }

    #[test]
    fn test_validate_rejects_negative_cost() {
        let record = EventRecord::new(date(2024, 1, 1), "C1", "mobile", 1, dec!(-0.01));
        let err = record.validate(RecordLocation::Line(7)).unwrap_err();
        assert!(matches!(
            err,
            ReportError::InvalidRecord {
                location: RecordLocation::Line(7),
                ..
            }
        ));
        assert!(err.to_string().starts_with("Invalid record at line 7:"));
    }

    #[test]
    fn test_validate_accepts_zero_cost() {
        let record = EventRecord::new(date(2024, 1, 1), "C1", "mobile", 0, dec!(0));
        assert!(record.validate(RecordLocation::Line(1)).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_campaign() {
        let record = EventRecord::new(date(2024, 1, 1), "  ", "mobile", 0, dec!(0));
        let err = record.validate(RecordLocation::Element(3)).unwrap_err();
        assert!(err.to_string().starts_with("Invalid record at element 3:"));
    }

    #[test]
    fn test_deserialize_json_record() {
        let json = r#"{"date":"2024-01-02","campaign_id":"C1","device":"desktop","clicks":5,"cost":2.0}"#;
        let record: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, date(2024, 1, 2));
        assert_eq!(record.campaign_id.as_str(), "C1");
        assert_eq!(record.clicks, 5);
        assert_eq!(record.cost, dec!(2.0));
    }

    #[test]
    fn test_vec_is_a_record_source() {
        let mut source = vec![EventRecord::new(date(2024, 1, 1), "C1", "tv", 1, dec!(1))];
        assert_eq!(source.read_records().unwrap().len(), 1);
        assert!(source.read_records().unwrap().is_empty());
    }
}
