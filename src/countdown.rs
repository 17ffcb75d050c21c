use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone as _};

use crate::error::{TickgifError, TickgifResult};

const MILLIS_PER_SECOND: f64 = 1_000.0;
const MILLIS_PER_MINUTE: f64 = 60_000.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Result of comparing a target instant against now: either the target has
/// already passed, or there is a live remaining span to count down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Countdown {
    Expired,
    Remaining(Remaining),
}

/// A non-negative span of remaining time, tracked at millisecond resolution
/// and consumed one second at a time while frames are emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Remaining {
    millis: i64,
}

/// The four rendered countdown fields, already zero-padded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fields {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

/// Compare the parsed target timestamp against `now`.
///
/// A target at or before `now` yields [`Countdown::Expired`]; anything in the
/// future yields the live remaining span.
pub fn compute_remaining(target: &str, now: DateTime<Local>) -> TickgifResult<Countdown> {
    let target = parse_target(target)?;
    let difference = target.signed_duration_since(now).num_milliseconds();
    if difference <= 0 {
        Ok(Countdown::Expired)
    } else {
        Ok(Countdown::Remaining(Remaining::from_millis(difference)?))
    }
}

/// Parse a target timestamp in any of the accepted calendar forms.
///
/// Date-time forms are interpreted in the local timezone; a bare date means
/// local midnight.
pub fn parse_target(s: &str) -> TickgifResult<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_from_naive(naive);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return local_from_naive(date.and_time(NaiveTime::MIN));
    }
    Err(TickgifError::time(format!(
        "unrecognized target timestamp '{s}'"
    )))
}

fn local_from_naive(naive: NaiveDateTime) -> TickgifResult<DateTime<Local>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| {
            TickgifError::time(format!(
                "target '{naive}' does not exist in the local timezone"
            ))
        })
}

impl Remaining {
    pub fn from_millis(millis: i64) -> TickgifResult<Self> {
        if millis < 0 {
            return Err(TickgifError::time(
                "remaining span must be non-negative milliseconds",
            ));
        }
        Ok(Self { millis })
    }

    pub fn millis(&self) -> i64 {
        self.millis
    }

    pub fn total_days(&self) -> f64 {
        self.millis as f64 / MILLIS_PER_DAY
    }

    pub fn total_hours(&self) -> f64 {
        self.millis as f64 / MILLIS_PER_HOUR
    }

    pub fn total_minutes(&self) -> f64 {
        self.millis as f64 / MILLIS_PER_MINUTE
    }

    pub fn total_seconds(&self) -> f64 {
        self.millis as f64 / MILLIS_PER_SECOND
    }

    /// Break the span into whole days / hours / minutes / seconds.
    ///
    /// Each smaller unit is the floor of the corresponding total minus the
    /// already-floored larger units, matching the rendering this crate
    /// replicates. On integer-millisecond inputs this agrees with plain
    /// remainder arithmetic, including at exact unit boundaries.
    pub fn fields(&self) -> Fields {
        let days = self.total_days().floor() as i64;
        let hours = self.total_hours().floor() as i64 - days * 24;
        let minutes = self.total_minutes().floor() as i64 - days * 1_440 - hours * 60;
        let seconds =
            self.total_seconds().floor() as i64 - days * 86_400 - hours * 3_600 - minutes * 60;
        Fields {
            days: pad2(days),
            hours: pad2(hours),
            minutes: pad2(minutes),
            seconds: pad2(seconds),
        }
    }

    /// Consume one second of the span, saturating at zero. A span that has
    /// reached zero stays there; it is never resurrected.
    pub fn subtract_second(&mut self) {
        self.millis = (self.millis - 1_000).max(0);
    }
}

/// Zero-pad to width 2, but only when the unpadded decimal form has length 1.
/// A three-digit value such as 100 is rendered as-is.
fn pad2(value: i64) -> String {
    let s = value.to_string();
    if s.len() == 1 { format!("0{s}") } else { s }
}
