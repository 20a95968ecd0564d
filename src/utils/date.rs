use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// First day of the 7-day window containing `date` that opens on `week_start`.
pub fn week_start_of(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let back = (7 + date.weekday().num_days_from_monday() as i64
        - week_start.num_days_from_monday() as i64)
        % 7;
    date - Duration::days(back)
}
