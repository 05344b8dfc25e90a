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

//! Report error types

use crate::event::RecordLocation;
use crate::key::{AggregateKey, Dimension};
use crate::view::ReportView;
use thiserror::Error;

/// Result type for reporting operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while building a report
#[derive(Debug, Error)]
pub enum ReportError {
    // Engine errors (fatal to the affected view)
    #[error("Invalid grouping: key {key} has no {dimension} dimension")]
    InvalidGrouping {
        dimension: Dimension,
        key: AggregateKey,
    },

    #[error("Invalid metric: {metric} is undefined for key {key}")]
    InvalidMetric { metric: String, key: AggregateKey },

    #[error("Numeric overflow summing {field} for key {key}")]
    Overflow {
        field: &'static str,
        key: AggregateKey,
    },

    #[error("View {view} failed: {source}")]
    View {
        view: ReportView,
        #[source]
        source: Box<ReportError>,
    },

    // Collaborator errors
    #[error("Invalid record at {location}: {reason}")]
    InvalidRecord {
        location: RecordLocation,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ReportError {
    /// Attach the failing view to an engine error.
    pub fn in_view(self, view: ReportView) -> Self {
        match self {
            already @ ReportError::View { .. } => already,
            other => ReportError::View {
                view,
                source: Box::new(other),
            },
        }
    }

    /// The view this error was raised in, if it was scoped to one.
    pub fn view(&self) -> Option<ReportView> {
        match self {
            ReportError::View { view, .. } => Some(*view),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        ReportError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CampaignId;

    #[test]
    fn test_in_view_wraps_once() {
        let key = AggregateKey::Device {
            campaign_id: CampaignId::from("C1"),
            device: "mobile".into(),
        };
        let err = ReportError::InvalidGrouping {
            dimension: Dimension::Year,
            key,
        }
        .in_view(ReportView::TopCampaignByClicks)
        .in_view(ReportView::DeviceClicks);

        assert_eq!(err.view(), Some(ReportView::TopCampaignByClicks));
        let message = err.to_string();
        assert!(message.contains("top_campaign_by_clicks"));
        assert!(message.contains("year"));
    }
}
