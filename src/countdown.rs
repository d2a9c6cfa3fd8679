use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Display used when the target timestamp cannot be parsed.
pub const NOT_A_DATE_DISPLAY: &str = "NaNs";

/// Remaining time split into calendar-free components.
///
/// Each component is floored from the signed millisecond delta on its own,
/// so a negative delta yields negative components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeParts {
    pub fn from_millis(ms: i64) -> Self {
        TimeParts {
            days: ms.div_euclid(MS_PER_DAY),
            hours: ms.div_euclid(MS_PER_HOUR) % 24,
            minutes: ms.div_euclid(MS_PER_MINUTE) % 60,
            seconds: ms.div_euclid(MS_PER_SECOND) % 60,
        }
    }

    /// `"1d 2h 3m 4s"`, leaving out zero days, hours and minutes.
    pub fn display(&self) -> String {
        let mut out = String::new();
        for (amount, unit) in [(self.days, 'd'), (self.hours, 'h'), (self.minutes, 'm')] {
            if amount != 0 {
                out.push_str(&format!("{}{} ", amount, unit));
            }
        }
        out.push_str(&format!("{}s", self.seconds));
        out
    }
}

/// Time left until an exam or test deadline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    /// Signed delta in milliseconds, `None` when the target did not parse.
    pub time_left_millis: Option<i64>,
    pub parts: Option<TimeParts>,
    pub display: String,
}

impl Countdown {
    pub fn from_millis(ms: i64) -> Self {
        let parts = TimeParts::from_millis(ms);
        Countdown {
            time_left_millis: Some(ms),
            parts: Some(parts),
            display: parts.display(),
        }
    }

    pub fn not_a_date() -> Self {
        Countdown {
            time_left_millis: None,
            parts: None,
            display: NOT_A_DATE_DISPLAY.to_string(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.time_left_millis.is_some_and(|ms| ms <= 0)
    }
}

/// Countdown from the current instant to `target_iso`.
pub fn remaining(target_iso: &str) -> Countdown {
    remaining_at(target_iso, Utc::now())
}

pub fn remaining_at(target_iso: &str, now: DateTime<Utc>) -> Countdown {
    match parse_target(target_iso) {
        Some(target) => Countdown::from_millis((target - now).num_milliseconds()),
        None => Countdown::not_a_date(),
    }
}

/// Parses a deadline timestamp.
///
/// Accepts RFC 3339 and RFC 2822 with an offset, minute-precision ISO 8601
/// with `Z` or a numeric offset, a date-time without offset (local time) and
/// a bare `YYYY-MM-DD` date (UTC midnight).
pub fn parse_target(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }

    let zulu = text
        .strip_suffix(['Z', 'z'])
        .map(|head| format!("{}+00:00", head));
    let with_offset = zulu.as_deref().unwrap_or(text);
    for format in ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(with_offset, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
