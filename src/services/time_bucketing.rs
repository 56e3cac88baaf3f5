use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};

use crate::errors::{FitTrackError, Result};
use crate::models::DayBucket;

/// Build `days` consecutive day buckets ending at `end`, oldest first.
pub fn day_buckets(end: NaiveDate, days: i64) -> Result<Vec<DayBucket>> {
    let start = window_start(end, days)?;

    Ok(start
        .iter_days()
        .take(days as usize)
        .map(DayBucket::new)
        .collect())
}

/// First day of a `days`-long window ending at `end`
pub fn window_start(end: NaiveDate, days: i64) -> Result<NaiveDate> {
    if days <= 0 {
        return Err(FitTrackError::invalid(format!(
            "window size must be positive, got {}",
            days
        )));
    }

    end.checked_sub_days(Days::new((days - 1) as u64))
        .ok_or_else(|| {
            FitTrackError::invalid(format!("window of {} days ending {} is out of range", days, end))
        })
}

/// Calendar day of a stored timestamp, read in `tz`
pub fn day_in_zone<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    at.with_timezone(tz).date_naive()
}

/// Sunday-to-Saturday calendar week containing `day`
pub fn week_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(day.weekday().num_days_from_sunday());
    let start = day.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seven_day_window() {
        let buckets = day_buckets(date(2024, 1, 7), 7).unwrap();

        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "2024-01-01",
                "2024-01-02",
                "2024-01-03",
                "2024-01-04",
                "2024-01-05",
                "2024-01-06",
                "2024-01-07"
            ]
        );
        assert_eq!(buckets[2].label, "Jan 3");
    }

    #[test]
    fn test_window_crosses_month_and_year() {
        let buckets = day_buckets(date(2024, 3, 1), 3).unwrap();
        assert_eq!(buckets[0].key, "2024-02-28");
        assert_eq!(buckets[1].key, "2024-02-29");

        let buckets = day_buckets(date(2024, 1, 1), 2).unwrap();
        assert_eq!(buckets[0].label, "Dec 31");
    }

    #[test]
    fn test_single_day_window() {
        let buckets = day_buckets(date(2024, 1, 7), 1).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].date, date(2024, 1, 7));
    }

    #[test]
    fn test_non_positive_window_is_rejected() {
        assert!(matches!(
            day_buckets(date(2024, 1, 7), 0),
            Err(FitTrackError::InvalidArgument(_))
        ));
        assert!(matches!(
            day_buckets(date(2024, 1, 7), -3),
            Err(FitTrackError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_oversized_window_is_rejected() {
        assert!(matches!(
            day_buckets(date(2024, 1, 7), i64::MAX),
            Err(FitTrackError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_week_bounds_start_on_sunday() {
        // Wednesday
        let (start, end) = week_bounds(date(2024, 1, 3));
        assert_eq!(start, date(2023, 12, 31));
        assert_eq!(end, date(2024, 1, 6));

        let (start, _) = week_bounds(date(2024, 1, 7));
        assert_eq!(start, date(2024, 1, 7));
    }

    #[test]
    fn test_day_in_zone() {
        let at = Utc.with_ymd_and_hms(2024, 1, 3, 22, 30, 0).unwrap();
        assert_eq!(day_in_zone(&at, &Utc), date(2024, 1, 3));
        assert_eq!(
            day_in_zone(&at, &FixedOffset::east_opt(3 * 3600).unwrap()),
            date(2024, 1, 4)
        );
        assert_eq!(
            day_in_zone(&at, &FixedOffset::west_opt(23 * 3600).unwrap()),
            date(2024, 1, 2)
        );
    }
}
