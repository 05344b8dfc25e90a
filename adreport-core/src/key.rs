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

//! Grouping keys
//!
//! [`AggregateKey`] is the composite key records are grouped by. Its derived
//! ordering (field by field, in declaration order) is the sort order of the
//! report views, so field order here is significant.

use crate::event::{CampaignId, Device, EventRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite grouping key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "grouping", rename_all = "snake_case")]
pub enum AggregateKey {
    /// (date, campaign_id)
    Daily {
        date: NaiveDate,
        campaign_id: CampaignId,
    },
    /// (year, month, campaign_id)
    Monthly {
        year: i32,
        month: u32,
        campaign_id: CampaignId,
    },
    /// (campaign_id, device)
    Device {
        campaign_id: CampaignId,
        device: Device,
    },
}

impl AggregateKey {
    pub fn grouping(&self) -> Grouping {
        match self {
            AggregateKey::Daily { .. } => Grouping::Daily,
            AggregateKey::Monthly { .. } => Grouping::Monthly,
            AggregateKey::Device { .. } => Grouping::Device,
        }
    }

    pub fn campaign_id(&self) -> &CampaignId {
        match self {
            AggregateKey::Daily { campaign_id, .. }
            | AggregateKey::Monthly { campaign_id, .. }
            | AggregateKey::Device { campaign_id, .. } => campaign_id,
        }
    }

    /// Value of a single dimension, or `None` if this key does not carry it.
    pub fn dimension(&self, dimension: Dimension) -> Option<DimensionValue> {
        match (self, dimension) {
            (AggregateKey::Daily { date, .. }, Dimension::Date) => {
                Some(DimensionValue::Date(*date))
            }
            (AggregateKey::Monthly { year, .. }, Dimension::Year) => {
                Some(DimensionValue::Year(*year))
            }
            (AggregateKey::Monthly { month, .. }, Dimension::Month) => {
                Some(DimensionValue::Month(*month))
            }
            (_, Dimension::CampaignId) => {
                Some(DimensionValue::CampaignId(self.campaign_id().clone()))
            }
            (AggregateKey::Device { device, .. }, Dimension::Device) => {
                Some(DimensionValue::Device(device.clone()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for AggregateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateKey::Daily { date, campaign_id } => write!(f, "({}, {})", date, campaign_id),
            AggregateKey::Monthly {
                year,
                month,
                campaign_id,
            } => write!(f, "({}, {}, {})", year, month, campaign_id),
            AggregateKey::Device {
                campaign_id,
                device,
            } => write!(f, "({}, {})", campaign_id, device),
        }
    }
}

/// Named grouping dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Date,
    Year,
    Month,
    CampaignId,
    Device,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Date => "date",
            Dimension::Year => "year",
            Dimension::Month => "month",
            Dimension::CampaignId => "campaign_id",
            Dimension::Device => "device",
        };
        f.write_str(name)
    }
}

/// Value of one dimension extracted from a key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionValue {
    Date(NaiveDate),
    Year(i32),
    Month(u32),
    CampaignId(CampaignId),
    Device(Device),
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionValue::Date(d) => write!(f, "{}", d),
            DimensionValue::Year(y) => write!(f, "{}", y),
            DimensionValue::Month(m) => write!(f, "{}", m),
            DimensionValue::CampaignId(c) => write!(f, "{}", c),
            DimensionValue::Device(d) => write!(f, "{}", d),
        }
    }
}

/// Ordered sub-tuple of a key that scopes a ranking
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionKey(pub Vec<DimensionValue>);

impl PartitionKey {
    pub fn values(&self) -> &[DimensionValue] {
        &self.0
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// Which composite key records are grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    Daily,
    Monthly,
    Device,
}

impl Grouping {
    /// Project a record onto this grouping's key.
    pub fn key_of(&self, record: &EventRecord) -> AggregateKey {
        match self {
            Grouping::Daily => AggregateKey::Daily {
                date: record.date,
                campaign_id: record.campaign_id.clone(),
            },
            Grouping::Monthly => AggregateKey::Monthly {
                year: record.year(),
                month: record.month(),
                campaign_id: record.campaign_id.clone(),
            },
            Grouping::Device => AggregateKey::Device {
                campaign_id: record.campaign_id.clone(),
                device: record.device.clone(),
            },
        }
    }

    pub fn dimensions(&self) -> &'static [Dimension] {
        match self {
            Grouping::Daily => &[Dimension::Date, Dimension::CampaignId],
            Grouping::Monthly => &[Dimension::Year, Dimension::Month, Dimension::CampaignId],
            Grouping::Device => &[Dimension::CampaignId, Dimension::Device],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record() -> EventRecord {
        EventRecord::new(
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            "C7",
            "tablet",
            4,
            dec!(1.25),
        )
    }

    #[test]
    fn test_key_of_every_grouping() {
        let r = record();
        assert_eq!(
            Grouping::Monthly.key_of(&r),
            AggregateKey::Monthly {
                year: 2024,
                month: 2,
                campaign_id: "C7".into()
            }
        );
        assert_eq!(Grouping::Daily.key_of(&r).grouping(), Grouping::Daily);
        assert_eq!(Grouping::Device.key_of(&r).campaign_id().as_str(), "C7");
    }

    #[test]
    fn test_dimensions_match_key_fields() {
        let r = record();
        for grouping in [Grouping::Daily, Grouping::Monthly, Grouping::Device] {
            let key = grouping.key_of(&r);
            for dim in grouping.dimensions() {
                assert!(key.dimension(*dim).is_some(), "{} missing {}", key, dim);
            }
        }
    }

    #[test]
    fn test_missing_dimension() {
        let key = Grouping::Device.key_of(&record());
        assert_eq!(key.dimension(Dimension::Year), None);
        assert_eq!(key.dimension(Dimension::Date), None);
    }

    #[test]
    fn test_key_ordering_is_field_order() {
        let a = AggregateKey::Monthly {
            year: 2023,
            month: 12,
            campaign_id: "Z".into(),
        };
        let b = AggregateKey::Monthly {
            year: 2024,
            month: 1,
            campaign_id: "A".into(),
        };
        assert!(a < b);
    }

    #[test]
    fn test_partition_key_display() {
        let key = PartitionKey(vec![DimensionValue::Year(2024), DimensionValue::Month(1)]);
        assert_eq!(key.to_string(), "2024/1");
    }

    #[test]
    fn test_key_serializes_with_grouping_tag() {
        let json = serde_json::to_value(Grouping::Daily.key_of(&record())).unwrap();
        assert_eq!(json["grouping"], "daily");
        assert_eq!(json["date"], "2024-02-29");
        assert_eq!(json["campaign_id"], "C7");
    }
}
