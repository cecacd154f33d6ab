use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;

/// Where an activity stands relative to its end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// No end date, or one that could not be read.
    Unbounded,
    /// Whole days left before the end date runs out; `0` is the last day.
    Active(i64),
    Expired,
}

impl CountdownState {
    pub fn label(self) -> String {
        match self {
            Self::Unbounded => "长期有效".to_string(),
            Self::Expired => "已过期".to_string(),
            Self::Active(0) => "最后一天".to_string(),
            Self::Active(days) => format!("剩余 {days} 天"),
        }
    }
}

impl fmt::Display for CountdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Parse an end date in any of the shapes the table has been seen to hold.
pub fn parse_end_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y/%m/%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Countdown for `end_date` as seen at `now`.
///
/// The deadline is the end of the end date's day: expired once `now` falls on
/// a later calendar day, otherwise the remaining whole days are the calendar
/// distance between the two dates.
pub fn countdown_state(end_date: Option<&str>, now: NaiveDateTime) -> CountdownState {
    let Some(end) = end_date.and_then(parse_end_date) else {
        return CountdownState::Unbounded;
    };
    let today = now.date();
    if today > end {
        CountdownState::Expired
    } else {
        CountdownState::Active((end - today).num_days())
    }
}
