use chrono::{Datelike, Duration, NaiveDate};

use crate::calendar::Event;

const PAD_WIDTH: usize = 2;

/// Number of days in the given 1-indexed month. Months outside 1..=12 roll
/// cyclically with carry into the year, so month 13 is January of the next
/// year. Never errors.
pub fn days_in_month(year: i32, month: i32) -> u32 {
    let year = year + (month - 1).div_euclid(12);
    let month = (month - 1).rem_euclid(12) as u32 + 1;

    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    next_month_first
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(0)
}

/// The Sunday-through-Saturday week containing `date`.
pub fn week_dates(date: NaiveDate) -> Vec<NaiveDate> {
    let sunday = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
    (0..7).map(|offset| sunday + Duration::days(offset)).collect()
}

/// Month grid for the month containing `date`: rows of 7 cells, Sunday
/// first, `None` outside the month, otherwise the 1-indexed day number.
pub fn weeks_at_month(date: NaiveDate) -> Vec<[Option<u32>; 7]> {
    let day_count = days_in_month(date.year(), date.month() as i32);
    let Some(first_day) = NaiveDate::from_ymd_opt(date.year(), date.month(), 1) else {
        return Vec::new();
    };

    let lead = first_day.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<u32>> = vec![None; lead];
    cells.extend((1..=day_count).map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    cells
        .chunks(7)
        .map(|week| {
            let mut row = [None; 7];
            row.copy_from_slice(week);
            row
        })
        .collect()
}

/// Events whose day-of-month equals `day`. Days outside 1..=31 yield an
/// empty result rather than an error.
pub fn events_for_day(events: &[Event], day: u32) -> Vec<&Event> {
    if !(1..=31).contains(&day) {
        return Vec::new();
    }
    events.iter().filter(|event| event.date.day() == day).collect()
}

/// `"{year}년 {month}월 {n}주"` for the week containing `date`. The week is
/// assigned to the month containing its Thursday, so a week spilling into
/// the next month (or year) reports that month's first week.
pub fn format_week(date: NaiveDate) -> String {
    let to_thursday = 4 - date.weekday().num_days_from_sunday() as i64;
    let thursday = date + Duration::days(to_thursday);
    let week_number = (thursday.day() - 1) / 7 + 1;
    format!("{}년 {}월 {}주", thursday.year(), thursday.month(), week_number)
}

pub fn format_month(date: NaiveDate) -> String {
    format!("{}년 {}월", date.year(), date.month())
}

/// Inclusive on both bounds. An inverted range (`start > end`) contains no
/// dates at all, by policy.
pub fn is_date_in_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

/// Left-pads the string form of `value` with zeros until it is `size`
/// characters long; longer strings are returned unchanged. A fractional
/// part counts toward the length, so only the integer side grows.
pub fn fill_zero(value: f64, size: usize) -> String {
    let raw = value.to_string();
    if raw.len() >= size {
        raw
    } else {
        format!("{}{}", "0".repeat(size - raw.len()), raw)
    }
}

/// `YYYY-MM-DD` using the date's own year and month; `day` substitutes the
/// day-of-month when given and is not re-validated against month length.
pub fn format_date(date: NaiveDate, day: Option<u32>) -> String {
    let day = day.unwrap_or_else(|| date.day());
    format!(
        "{}-{}-{}",
        date.year(),
        fill_zero(date.month() as f64, PAD_WIDTH),
        fill_zero(day as f64, PAD_WIDTH),
    )
}
