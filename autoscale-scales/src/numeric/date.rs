use autoscale_data::value::{date_to_days, days_to_date};
use autoscale_data::{DateUnit, Transform};
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

use crate::error::ScaleError;
use crate::extent::NumericExtent;
use crate::numeric::{pad_domain, NumericScale, ScaleKind};

const MAX_DATE_TICKS: usize = 1000;

/// Calendar interval used to step a date axis
#[derive(Debug, Clone, Copy, PartialEq)]
enum TimeInterval {
    Second(u32),
    Minute(u32),
    Hour(u32),
    Day(u32),
    Week(u32),
    Month(u32),
    Year(u32),
}

const INTERVAL_HIERARCHY: &[TimeInterval] = &[
    TimeInterval::Second(1),
    TimeInterval::Second(5),
    TimeInterval::Second(15),
    TimeInterval::Second(30),
    TimeInterval::Minute(1),
    TimeInterval::Minute(5),
    TimeInterval::Minute(15),
    TimeInterval::Minute(30),
    TimeInterval::Hour(1),
    TimeInterval::Hour(3),
    TimeInterval::Hour(6),
    TimeInterval::Hour(12),
    TimeInterval::Day(1),
    TimeInterval::Day(2),
    TimeInterval::Week(1),
    TimeInterval::Month(1),
    TimeInterval::Month(3),
    TimeInterval::Year(1),
    TimeInterval::Year(2),
    TimeInterval::Year(5),
    TimeInterval::Year(10),
    TimeInterval::Year(20),
    TimeInterval::Year(50),
    TimeInterval::Year(100),
];

impl TimeInterval {
    /// Calendar unit this interval steps in
    fn unit(&self) -> DateUnit {
        match self {
            TimeInterval::Second(_) => DateUnit::Second,
            TimeInterval::Minute(_) => DateUnit::Minute,
            TimeInterval::Hour(_) => DateUnit::Hour,
            TimeInterval::Day(_) => DateUnit::Day,
            TimeInterval::Week(_) => DateUnit::Week,
            TimeInterval::Month(n) if *n >= 3 => DateUnit::Quarter,
            TimeInterval::Month(_) => DateUnit::Month,
            TimeInterval::Year(n) if *n >= 100 => DateUnit::Century,
            TimeInterval::Year(n) if *n >= 10 => DateUnit::Decade,
            TimeInterval::Year(_) => DateUnit::Year,
        }
    }

    fn approx_days(&self) -> f64 {
        match self {
            TimeInterval::Second(n) => f64::from(*n) / 86_400.0,
            TimeInterval::Minute(n) => f64::from(*n) / 1_440.0,
            TimeInterval::Hour(n) => f64::from(*n) / 24.0,
            TimeInterval::Day(n) => f64::from(*n),
            TimeInterval::Week(n) => f64::from(*n) * 7.0,
            TimeInterval::Month(n) => f64::from(*n) * 365.25 / 12.0,
            TimeInterval::Year(n) => f64::from(*n) * 365.25,
        }
    }

    /// Start of the interval containing `dt`. Months and years are aligned to
    /// multiples of the interval length.
    fn floor(&self, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        let date = dt.date();
        match self {
            TimeInterval::Second(n) => {
                date.and_hms_opt(dt.hour(), dt.minute(), dt.second() / n * n)
            }
            TimeInterval::Minute(n) => date.and_hms_opt(dt.hour(), dt.minute() / n * n, 0),
            TimeInterval::Hour(n) => date.and_hms_opt(dt.hour() / n * n, 0, 0),
            TimeInterval::Day(_) => date.and_hms_opt(0, 0, 0),
            TimeInterval::Week(_) => {
                let since_sunday = i64::from(date.weekday().num_days_from_sunday());
                date.checked_sub_signed(TimeDelta::try_days(since_sunday)?)?
                    .and_hms_opt(0, 0, 0)
            }
            TimeInterval::Month(n) => {
                let months = date.year() * 12 + date.month0() as i32;
                let floored = months.div_euclid(*n as i32) * *n as i32;
                NaiveDate::from_ymd_opt(floored.div_euclid(12), floored.rem_euclid(12) as u32 + 1, 1)?
                    .and_hms_opt(0, 0, 0)
            }
            TimeInterval::Year(n) => {
                let year = date.year().div_euclid(*n as i32) * *n as i32;
                NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)
            }
        }
    }

    /// First interval boundary at or after `dt`
    fn ceil(&self, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        let floored = self.floor(dt)?;
        if floored == dt {
            Some(dt)
        } else {
            self.offset(floored, 1)
        }
    }

    fn offset(&self, dt: NaiveDateTime, count: i32) -> Option<NaiveDateTime> {
        let delta = |n: u32, unit_seconds: i64| {
            TimeDelta::try_seconds(i64::from(n) * i64::from(count) * unit_seconds)
        };
        match self {
            TimeInterval::Second(n) => dt.checked_add_signed(delta(*n, 1)?),
            TimeInterval::Minute(n) => dt.checked_add_signed(delta(*n, 60)?),
            TimeInterval::Hour(n) => dt.checked_add_signed(delta(*n, 3_600)?),
            TimeInterval::Day(n) => dt.checked_add_signed(delta(*n, 86_400)?),
            TimeInterval::Week(n) => dt.checked_add_signed(delta(*n, 604_800)?),
            TimeInterval::Month(n) => add_months(dt, i64::from(*n) * i64::from(count)),
            TimeInterval::Year(n) => add_months(dt, i64::from(*n) * i64::from(count) * 12),
        }
    }
}

fn add_months(dt: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        dt.checked_add_months(magnitude)
    } else {
        dt.checked_sub_months(magnitude)
    }
}

/// Interval whose tick count over `span_days` is closest to `target`, never
/// finer than `min_unit`
fn select_interval(span_days: f64, target: f64, min_unit: Option<DateUnit>) -> TimeInterval {
    let mut best = TimeInterval::Year(100);
    let mut best_diff = f64::INFINITY;
    for &interval in INTERVAL_HIERARCHY {
        if min_unit.is_some_and(|unit| interval.unit() < unit) {
            continue;
        }
        let diff = (span_days / interval.approx_days() - target).abs();
        if diff < best_diff {
            best_diff = diff;
            best = interval;
        }
    }
    best
}

/// Builds a date scale over an extent measured in days since the epoch.
///
/// Ticks fall on calendar boundaries of the interval that best matches the
/// requested tick count. Dates outside the calendar leave the domain un-niced
/// with its two ends as the only divisions.
pub fn make_date_scale(
    extent: &NumericExtent,
    nice: bool,
    pad: [f64; 2],
    tick_count: usize,
) -> NumericScale {
    let unit = extent.date_unit.unwrap_or(DateUnit::Day);
    let (mut low, mut high) = (extent.low, extent.high);
    if low == high {
        let half = unit.approx_days() / 2.0;
        (low, high) = (low - half, high + half);
    }
    (low, high) = pad_domain(low, high, pad);

    let (min, max, divisions) = match calendar_ticks(low, high, nice, tick_count, extent.date_unit) {
        Ok(built) => built,
        Err(err) => {
            tracing::warn!(%err, low, high, "falling back to an un-niced date scale");
            (low, high, vec![low, high])
        }
    };

    NumericScale {
        kind: ScaleKind::Date,
        transform: Transform::Linear,
        min,
        max,
        divisions,
        granular: false,
        date_unit: extent.date_unit,
    }
}

fn calendar_ticks(
    low: f64,
    high: f64,
    nice: bool,
    tick_count: usize,
    min_unit: Option<DateUnit>,
) -> Result<(f64, f64, Vec<f64>), ScaleError> {
    let to_date = |days: f64| days_to_date(days).ok_or(ScaleError::DateOutOfRange(days));
    let interval = select_interval(high - low, tick_count.max(1) as f64, min_unit);

    let (mut start, mut end) = (to_date(low)?, to_date(high)?);
    if nice {
        start = interval.floor(start).ok_or(ScaleError::DateOutOfRange(low))?;
        end = interval.ceil(end).ok_or(ScaleError::DateOutOfRange(high))?;
    }

    let mut divisions = Vec::new();
    let mut current = interval.ceil(start);
    while let Some(tick) = current.filter(|tick| *tick <= end) {
        if divisions.len() >= MAX_DATE_TICKS {
            return Err(ScaleError::TooManyTicks(MAX_DATE_TICKS));
        }
        divisions.push(date_to_days(tick));
        current = interval.offset(tick, 1);
    }

    tracing::debug!(?interval, ticks = divisions.len(), "built date scale");
    Ok((date_to_days(start), date_to_days(end), divisions))
}
