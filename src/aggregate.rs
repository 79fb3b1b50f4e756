//! Grouping of message token counts into a dense (bucket, role) table.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::models::{MessageRecord, Role};

/// Coarse time grouping used for the chart's x axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeBucket {
    Day,
    Week,
    Month,
}

impl TimeBucket {
    /// Bucket key for a timestamp, evaluated in `tz`. All three
    /// formats sort chronologically as plain strings.
    pub fn key_for(self, ts: DateTime<Utc>, tz: Tz) -> String {
        let local = ts.with_timezone(&tz);
        match self {
            TimeBucket::Day => local.format("%Y-%m-%d").to_string(),
            TimeBucket::Week => local.format("%G-W%V").to_string(),
            TimeBucket::Month => local.format("%Y-%m").to_string(),
        }
    }

    /// Axis label for the rendered chart.
    pub fn axis_label(self) -> &'static str {
        match self {
            TimeBucket::Day => "Date",
            TimeBucket::Week => "Week",
            TimeBucket::Month => "Month",
        }
    }
}

/// One chart bar: a bucket key plus a token total per role column, in
/// [`Role::ALL`] order. Roles without messages hold zero, so the table
/// is always rectangular.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketRow {
    pub key: String,
    pub tokens: [u64; Role::COUNT],
}

impl BucketRow {
    pub fn get(&self, role: Role) -> u64 {
        self.tokens[role.index()]
    }

    pub fn total(&self) -> u64 {
        self.tokens.iter().sum()
    }
}

/// The aggregated table, rows sorted ascending by bucket key.
#[derive(Clone, Debug)]
pub struct UsageTable {
    pub bucket: TimeBucket,
    pub rows: Vec<BucketRow>,
}

impl UsageTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_tokens(&self) -> u64 {
        self.rows.iter().map(BucketRow::total).sum()
    }

    /// Tallest bar, used for chart scaling.
    pub fn max_row_total(&self) -> u64 {
        self.rows.iter().map(BucketRow::total).max().unwrap_or(0)
    }

    /// Sum of one role column across all rows.
    pub fn role_total(&self, role: Role) -> u64 {
        self.rows.iter().map(|row| row.get(role)).sum()
    }
}

/// Sum token counts per (bucket, role). Summation is commutative, so
/// the result does not depend on input order.
pub fn aggregate(records: &[MessageRecord], bucket: TimeBucket, tz: Tz) -> UsageTable {
    let mut cells: BTreeMap<String, [u64; Role::COUNT]> = BTreeMap::new();
    for record in records {
        let totals = cells.entry(bucket.key_for(record.ts, tz)).or_default();
        totals[record.role.index()] += record.tokens;
    }

    UsageTable {
        bucket,
        rows: cells
            .into_iter()
            .map(|(key, tokens)| BucketRow { key, tokens })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(ts: DateTime<Utc>, role: Role, tokens: u64) -> MessageRecord {
        MessageRecord {
            conversation_id: "conv".to_string(),
            message_id: "msg".to_string(),
            role,
            ts,
            text: String::new(),
            tokens,
            model_slug: "unknown_model".to_string(),
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn groups_by_day_and_role() {
        let records = vec![
            record(at(2024, 1, 15, 9), Role::User, 1),
            record(at(2024, 1, 15, 10), Role::Assistant, 2),
            record(at(2024, 1, 16, 9), Role::User, 5),
        ];
        let table = aggregate(&records, TimeBucket::Day, chrono_tz::UTC);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].key, "2024-01-15");
        assert_eq!(table.rows[0].get(Role::User), 1);
        assert_eq!(table.rows[0].get(Role::Assistant), 2);
        assert_eq!(table.rows[1].key, "2024-01-16");
        assert_eq!(table.rows[1].get(Role::User), 5);
    }

    #[test]
    fn absent_cells_are_zero_not_missing() {
        let records = vec![record(at(2024, 1, 15, 9), Role::User, 3)];
        let table = aggregate(&records, TimeBucket::Day, chrono_tz::UTC);

        let row = &table.rows[0];
        assert_eq!(row.tokens.len(), Role::COUNT);
        assert_eq!(row.get(Role::Assistant), 0);
        assert_eq!(row.get(Role::System), 0);
        assert_eq!(row.get(Role::Tool), 0);
        assert_eq!(row.get(Role::Other), 0);
    }

    #[test]
    fn invariant_under_input_reordering() {
        let mut records = vec![
            record(at(2024, 1, 15, 9), Role::User, 1),
            record(at(2024, 1, 16, 9), Role::Assistant, 2),
            record(at(2024, 1, 15, 23), Role::User, 4),
            record(at(2024, 1, 16, 1), Role::Tool, 8),
        ];
        let forward = aggregate(&records, TimeBucket::Day, chrono_tz::UTC);
        records.reverse();
        let reversed = aggregate(&records, TimeBucket::Day, chrono_tz::UTC);

        assert_eq!(forward.rows, reversed.rows);
    }

    #[test]
    fn rows_sorted_chronologically() {
        let records = vec![
            record(at(2024, 2, 1, 9), Role::User, 1),
            record(at(2023, 12, 31, 9), Role::User, 1),
            record(at(2024, 1, 15, 9), Role::User, 1),
        ];
        let table = aggregate(&records, TimeBucket::Day, chrono_tz::UTC);
        let keys: Vec<&str> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["2023-12-31", "2024-01-15", "2024-02-01"]);
    }

    #[test]
    fn timezone_moves_bucket_boundary() {
        // 02:00 UTC on Jan 16 is still Jan 15 in New York.
        let records = vec![record(at(2024, 1, 16, 2), Role::User, 1)];

        let utc = aggregate(&records, TimeBucket::Day, chrono_tz::UTC);
        assert_eq!(utc.rows[0].key, "2024-01-16");

        let ny = aggregate(&records, TimeBucket::Day, chrono_tz::America::New_York);
        assert_eq!(ny.rows[0].key, "2024-01-15");
    }

    #[test]
    fn week_and_month_keys() {
        let records = vec![record(at(2024, 1, 15, 9), Role::User, 1)];

        let week = aggregate(&records, TimeBucket::Week, chrono_tz::UTC);
        assert_eq!(week.rows[0].key, "2024-W03");

        let month = aggregate(&records, TimeBucket::Month, chrono_tz::UTC);
        assert_eq!(month.rows[0].key, "2024-01");
    }

    #[test]
    fn empty_input_empty_table() {
        let table = aggregate(&[], TimeBucket::Day, chrono_tz::UTC);
        assert!(table.is_empty());
        assert_eq!(table.total_tokens(), 0);
        assert_eq!(table.max_row_total(), 0);
    }
}
