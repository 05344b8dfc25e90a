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

//! Property tests for aggregation and ranking

use adreport_core::{AggregateRow, EventRecord, Grouping, Metric, RankPolicy};
use adreport_query::{aggregate_by, partition_key_of, rank, MONTH_PARTITION};
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

const GROUPINGS: [Grouping; 3] = [Grouping::Daily, Grouping::Monthly, Grouping::Device];

fn arb_record() -> impl Strategy<Value = EventRecord> {
    (
        0i64..400,
        0u8..6,
        prop::sample::select(vec!["desktop", "mobile", "tablet"]),
        0u64..10_000,
        0i64..1_000_000,
    )
        .prop_map(|(offset, campaign, device, clicks, cents)| {
            let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
            EventRecord::new(
                start + chrono::Duration::days(offset),
                format!("C{}", campaign),
                device,
                clicks,
                Decimal::new(cents, 2),
            )
        })
}

fn arb_records() -> impl Strategy<Value = Vec<EventRecord>> {
    prop::collection::vec(arb_record(), 0..200)
}

proptest! {
    /// Every record lands in exactly one group
    #[test]
    fn prop_groups_partition_records(records in arb_records()) {
        for grouping in GROUPINGS {
            let rows = aggregate_by(&records, grouping).unwrap();
            let counted: u64 = rows.iter().map(|r| r.record_count).sum();
            prop_assert_eq!(counted, records.len() as u64);
        }
    }

    /// Totals equal the plain sums of the records sharing a key
    #[test]
    fn prop_sums_match_records(records in arb_records()) {
        for grouping in GROUPINGS {
            let mut expected: HashMap<_, (u64, Decimal)> = HashMap::new();
            for record in &records {
                let entry = expected.entry(grouping.key_of(record)).or_default();
                entry.0 += record.clicks;
                entry.1 += record.cost;
            }

            let rows = aggregate_by(&records, grouping).unwrap();
            prop_assert_eq!(rows.len(), expected.len());
            for row in rows {
                let (clicks, cost) = expected[&row.key];
                prop_assert_eq!(row.total_clicks, clicks);
                prop_assert_eq!(row.total_cost, cost);
            }
        }
    }

    /// Inside a partition, a larger metric never gets a worse rank and
    /// equal metrics share a rank
    #[test]
    fn prop_rank_monotonic(
        records in arb_records(),
        dense in any::<bool>(),
        by_cost in any::<bool>(),
    ) {
        let policy = if dense { RankPolicy::Dense } else { RankPolicy::Standard };
        let metric = if by_cost { Metric::TotalCost } else { Metric::TotalClicks };

        let rows = aggregate_by(&records, Grouping::Monthly).unwrap();
        let total = rows.len();
        let ranked = rank(rows, |r| partition_key_of(r, &MONTH_PARTITION), &metric, policy)
            .unwrap();
        prop_assert_eq!(ranked.len(), total);

        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.partition_key != b.partition_key {
                prop_assert!(a.partition_key < b.partition_key);
                prop_assert_eq!(b.rank, 1);
                continue;
            }
            let va = metric.value_of(&a.row).unwrap();
            let vb = metric.value_of(&b.row).unwrap();
            prop_assert!(va >= vb);
            if va == vb {
                prop_assert_eq!(a.rank, b.rank);
                prop_assert!(a.key() < b.key());
            } else {
                prop_assert!(a.rank < b.rank);
            }
        }
        if let Some(first) = ranked.first() {
            prop_assert_eq!(first.rank, 1);
        }
    }

    /// Dense ranks have no gaps; standard ranks count the rows ahead
    #[test]
    fn prop_rank_policies(records in arb_records()) {
        let rows = aggregate_by(&records, Grouping::Monthly).unwrap();
        let by_month = |r: &AggregateRow| partition_key_of(r, &MONTH_PARTITION);
        let standard = rank(rows.clone(), by_month, &Metric::TotalClicks, RankPolicy::Standard)
            .unwrap();
        let dense = rank(rows, by_month, &Metric::TotalClicks, RankPolicy::Dense).unwrap();

        let mut position = 0u64;
        for (i, row) in standard.iter().enumerate() {
            if i == 0 || standard[i - 1].partition_key != row.partition_key {
                position = 0;
            }
            position += 1;
            if i == 0
                || standard[i - 1].partition_key != row.partition_key
                || standard[i - 1].row.total_clicks != row.row.total_clicks
            {
                prop_assert_eq!(row.rank, position);
            }
        }

        for pair in dense.windows(2) {
            if pair[0].partition_key == pair[1].partition_key {
                prop_assert!(pair[1].rank - pair[0].rank <= 1);
            }
        }
        for (s, d) in standard.iter().zip(&dense) {
            prop_assert_eq!(s.key(), d.key());
            prop_assert!(d.rank <= s.rank);
        }
    }
}
