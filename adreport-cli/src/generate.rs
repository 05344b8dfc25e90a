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

//! Random sample records for trying out reports

use adreport_core::{EventRecord, ReportError, Result};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::io::Write;

pub const DEVICES: [&str; 3] = ["desktop", "mobile", "tablet"];

/// Shape of a generated data set
#[derive(Debug, Clone)]
pub struct SampleSpec {
    pub count: usize,
    pub campaigns: u32,
    pub start: NaiveDate,
    pub days: u32,
    /// Fixed seed for reproducible output
    pub seed: Option<u64>,
}

impl SampleSpec {
    pub fn validate(&self) -> Result<()> {
        if self.campaigns == 0 {
            return Err(ReportError::InvalidConfig(
                "campaigns must be at least 1".to_string(),
            ));
        }
        if self.days == 0 {
            return Err(ReportError::InvalidConfig("days must be at least 1".to_string()));
        }
        if self.start.checked_add_days(Days::new(u64::from(self.days))).is_none() {
            return Err(ReportError::InvalidConfig(format!(
                "{} days from {} is out of the calendar range",
                self.days, self.start
            )));
        }
        Ok(())
    }
}

/// Generate `spec.count` records spread uniformly over the date window
pub fn sample_records(spec: &SampleSpec) -> Result<Vec<EventRecord>> {
    spec.validate()?;

    let mut rng = match spec.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut records = Vec::with_capacity(spec.count);
    for _ in 0..spec.count {
        let offset = rng.gen_range(0..spec.days);
        let date = spec
            .start
            .checked_add_days(Days::new(u64::from(offset)))
            .ok_or_else(|| ReportError::InvalidConfig("date out of range".to_string()))?;
        let campaign = rng.gen_range(1..=spec.campaigns);
        let device = DEVICES[rng.gen_range(0..DEVICES.len())];
        let clicks = rng.gen_range(0..500u64);
        // cents per click between 0.05 and 2.00
        let cents = clicks as i64 * rng.gen_range(5..=200i64);

        records.push(EventRecord::new(
            date,
            format!("C{}", campaign),
            device,
            clicks,
            Decimal::new(cents, 2),
        ));
    }
    Ok(records)
}

/// Write records as JSON lines
pub fn write_json_lines<W: Write>(writer: &mut W, records: &[EventRecord]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *writer, record)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
