//! Day-oriented grouping of time-stamped records.
//!
//! Both scheduling views bucket their rows by calendar day before
//! rendering. The grouping lives here, in one place, so the highlighted
//! calendar days and the selected-day detail list can never disagree:
//! the detail list is a lookup into the same mapping that produced the
//! highlights.
//!
//! Timestamps are interpreted in the offset they carry (wall-clock time,
//! never normalized to UTC), so a `23:30-05:00` slot stays on the day the
//! backend printed. Records whose `start_time` does not parse are skipped
//! with a warning.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::models::{ProviderAppointment, TimeSlot};

/// A record that occupies a position on the day grid.
pub trait DaySlotted {
    fn start_time(&self) -> &str;
}

impl DaySlotted for TimeSlot {
    fn start_time(&self) -> &str {
        &self.start_time
    }
}

impl DaySlotted for ProviderAppointment {
    fn start_time(&self) -> &str {
        &self.start_time
    }
}

/// Parse a backend timestamp into wall-clock time.
///
/// RFC 3339 strings keep their embedded offset; offsetless strings are
/// taken as-is.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Calendar-date bucket key, e.g. `2024-03-01`.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Full header for a day section, e.g. `Friday, March 1, 2024`.
pub fn day_header(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Clock label for a timestamp, e.g. `9:00 AM`.
pub fn clock_label(at: NaiveDateTime) -> String {
    at.format("%-I:%M %p").to_string()
}

/// Clock label for a record's parsed start time, falling back to the raw
/// string when it does not parse.
pub fn start_clock_label<T: DaySlotted>(item: &T) -> String {
    match parse_timestamp(item.start_time()) {
        Some(at) => clock_label(at),
        None => item.start_time().to_string(),
    }
}

/// One calendar day's worth of records, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket<T> {
    pub date: NaiveDate,
    pub key: String,
    pub items: Vec<T>,
}

/// Records partitioned by calendar day.
///
/// Buckets appear in first-encounter order and each bucket preserves the
/// relative order of its records, so flattening the buckets yields a
/// permutation of the (parseable) input.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule<T> {
    days: Vec<DayBucket<T>>,
}

impl<T: DaySlotted + Clone> DaySchedule<T> {
    pub fn from_items(items: &[T]) -> Self {
        let mut days: Vec<DayBucket<T>> = Vec::new();
        for item in items {
            let Some(start) = parse_timestamp(item.start_time()) else {
                tracing::warn!(
                    start_time = item.start_time(),
                    "skipping record with unparseable start time"
                );
                continue;
            };
            let date = start.date();
            match days.iter_mut().find(|bucket| bucket.date == date) {
                Some(bucket) => bucket.items.push(item.clone()),
                None => days.push(DayBucket {
                    date,
                    key: day_key(date),
                    items: vec![item.clone()],
                }),
            }
        }
        Self { days }
    }
}

impl<T> DaySchedule<T> {
    pub fn days(&self) -> &[DayBucket<T>] {
        &self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Records on the given calendar day; empty when the day has none.
    pub fn on(&self, date: NaiveDate) -> &[T] {
        self.days
            .iter()
            .find(|bucket| bucket.date == date)
            .map(|bucket| bucket.items.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct days that have at least one record, in bucket order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|bucket| bucket.date).collect()
    }
}

/// All days of the given month, in order.
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|day| day.month() == month)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: &str, start: &str, available: bool) -> TimeSlot {
        TimeSlot {
            id: id.to_string(),
            start_time: start.to_string(),
            end_time: start.to_string(),
            available,
        }
    }

    #[test]
    fn test_single_day_keeps_input_order() {
        let slots = vec![
            slot("s1", "2024-03-01T09:00:00", true),
            slot("s2", "2024-03-01T09:30:00", true),
            slot("s3", "2024-03-01T10:00:00", false),
        ];

        let schedule = DaySchedule::from_items(&slots);
        assert_eq!(schedule.days().len(), 1);

        let bucket = &schedule.days()[0];
        assert_eq!(bucket.key, "2024-03-01");
        let ids: Vec<&str> = bucket.items.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["s1", "s2", "s3"]);
        assert!(!bucket.items[2].available);
    }

    #[test]
    fn test_flatten_is_permutation_preserving_within_bucket_order() {
        let slots = vec![
            slot("a", "2024-03-02T09:00:00", true),
            slot("b", "2024-03-01T09:00:00", true),
            slot("c", "2024-03-02T10:00:00", true),
            slot("d", "2024-03-01T11:00:00", true),
        ];

        let schedule = DaySchedule::from_items(&slots);
        let flattened: Vec<&str> = schedule
            .days()
            .iter()
            .flat_map(|bucket| bucket.items.iter().map(|s| s.id.as_str()))
            .collect();

        // Bucket order follows first encounter; within a bucket, input order.
        assert_eq!(flattened, ["a", "c", "b", "d"]);

        let mut sorted = flattened.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_same_date_slots_share_a_bucket() {
        let slots = vec![
            slot("s1", "2024-03-01T08:00:00", true),
            slot("s2", "2024-03-01T16:45:00", true),
        ];

        let schedule = DaySchedule::from_items(&slots);
        assert_eq!(schedule.days().len(), 1);
        assert_eq!(schedule.days()[0].key, "2024-03-01");
    }

    #[test]
    fn test_bucketing_uses_embedded_offset_not_utc() {
        // 23:30-05:00 is 04:30 UTC the next day; it must stay on March 1.
        let slots = vec![slot("s1", "2024-03-01T23:30:00-05:00", true)];

        let schedule = DaySchedule::from_items(&slots);
        assert_eq!(schedule.days()[0].key, "2024-03-01");
    }

    #[test]
    fn test_unparseable_start_time_is_skipped() {
        let slots = vec![
            slot("bad", "not-a-timestamp", true),
            slot("good", "2024-03-01T09:00:00", true),
        ];

        let schedule = DaySchedule::from_items(&slots);
        assert_eq!(schedule.days().len(), 1);
        assert_eq!(schedule.days()[0].items[0].id, "good");
    }

    #[test]
    fn test_on_matches_highlighted_dates() {
        let appointments = vec![
            ProviderAppointment {
                id: "a1".to_string(),
                start_time: "2024-03-01T09:00:00".to_string(),
                end_time: "2024-03-01T09:30:00".to_string(),
                patient_name: "Ada Lovelace".to_string(),
                reason: "Checkup".to_string(),
                status: None,
            },
            ProviderAppointment {
                id: "a2".to_string(),
                start_time: "2024-03-02T10:00:00".to_string(),
                end_time: "2024-03-02T10:30:00".to_string(),
                patient_name: "Grace Hopper".to_string(),
                reason: "Follow-up".to_string(),
                status: Some("pending".to_string()),
            },
        ];

        let schedule = DaySchedule::from_items(&appointments);

        let march_2 = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let on_march_2 = schedule.on(march_2);
        assert_eq!(on_march_2.len(), 1);
        assert_eq!(on_march_2[0].id, "a2");

        assert_eq!(
            schedule.dates(),
            vec![
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                march_2,
            ]
        );

        let empty_day = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        assert!(schedule.on(empty_day).is_empty());
    }

    #[test]
    fn test_day_header_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(day_header(date), "Friday, March 1, 2024");
    }

    #[test]
    fn test_clock_label_format() {
        let morning = parse_timestamp("2024-03-01T09:00:00").unwrap();
        assert_eq!(clock_label(morning), "9:00 AM");

        let afternoon = parse_timestamp("2024-03-01T13:30:00").unwrap();
        assert_eq!(clock_label(afternoon), "1:30 PM");
    }

    #[test]
    fn test_start_clock_label_falls_back_to_raw() {
        let broken = slot("s1", "garbage", true);
        assert_eq!(start_clock_label(&broken), "garbage");
    }

    #[test]
    fn test_parse_timestamp_accepts_fractional_seconds_and_z() {
        assert!(parse_timestamp("2024-03-01T09:00:00.123").is_some());
        assert!(parse_timestamp("2024-03-01T09:00:00Z").is_some());
    }

    #[test]
    fn test_month_days() {
        let days = month_days(2024, 3);
        assert_eq!(days.len(), 31);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        // March 2024 starts on a Friday.
        assert_eq!(days[0].weekday().num_days_from_monday(), 4);

        // February in a leap year.
        assert_eq!(month_days(2024, 2).len(), 29);
    }
}
