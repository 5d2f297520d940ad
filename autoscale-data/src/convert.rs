//! Conversions between field kinds.
//!
//! The `as_*` functions interpret a single value; the `to_*` functions build a
//! new field of the target kind over the converted rows. Values that cannot be
//! converted become missing.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::field::Field;
use crate::types::{DateUnit, FieldKind};
use crate::value::{date_to_days, days_to_date, ItemsList, Value};

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%Y/%m/%d",
];

/// Numeric interpretation of a value.
///
/// Text may carry a leading currency symbol, a trailing percent sign and
/// thousands separators. Dates are read as days since the epoch.
pub fn as_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(v) => Some(*v),
        Value::Date(d) => Some(date_to_days(*d)),
        Value::Text(s) => parse_number(s),
        Value::List(_) => None,
    }
}

/// Date interpretation of a value. Numbers are read as days since the epoch.
pub fn as_date(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Date(d) => Some(*d),
        Value::Number(v) => days_to_date(*v),
        Value::Text(s) => parse_date(s),
        Value::List(_) => None,
    }
}

pub fn to_numeric(field: &Field) -> Field {
    let values = field
        .values()
        .iter()
        .map(|value| match value {
            Some(Value::Date(_)) | None => None,
            Some(value) => as_numeric(value).map(Value::Number),
        })
        .collect();
    relabel(Field::with_kind(field.name(), FieldKind::Numeric, values), field)
}

/// Converts to a date field.
///
/// With a [`DateUnit::Year`] hint, numbers are read as calendar years rather
/// than as days since the epoch.
pub fn to_date(field: &Field, date_unit: Option<DateUnit>) -> Field {
    let as_years = date_unit == Some(DateUnit::Year);
    let values = field
        .values()
        .iter()
        .map(|value| {
            let date = match value {
                Some(Value::Number(year)) if as_years => year_start(*year),
                Some(value) => as_date(value),
                None => None,
            };
            date.map(Value::Date)
        })
        .collect();
    relabel(Field::date(field.name(), values, date_unit), field)
}

/// Converts to a list field by splitting text on commas
pub fn to_list(field: &Field) -> Field {
    let values = field
        .values()
        .iter()
        .map(|value| value.as_ref().and_then(as_list).map(Value::List))
        .collect();
    relabel(Field::list(field.name(), values), field)
}

fn relabel(converted: Field, source: &Field) -> Field {
    if source.label() == source.name() {
        converted
    } else {
        converted.with_label(source.label())
    }
}

fn as_list(value: &Value) -> Option<ItemsList> {
    match value {
        Value::List(items) => Some(items.clone()),
        Value::Text(s) if s.trim().is_empty() => None,
        Value::Text(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .collect(),
        ),
        Value::Number(v) => Some(ItemsList::new(vec![v.to_string()])),
        Value::Date(d) => Some(ItemsList::new(vec![d.format("%Y-%m-%d").to_string()])),
    }
}

fn year_start(year: f64) -> Option<NaiveDateTime> {
    if !year.is_finite() || year.abs() > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.trunc() as i32, 1, 1)?.and_hms_opt(0, 0, 0)
}

fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim();
    let s = s.strip_prefix(['$', '£', '€']).unwrap_or(s).trim_start();
    let s = s.strip_suffix('%').unwrap_or(s).trim_end();
    if s.is_empty() {
        return None;
    }
    let s = if s.contains(',') {
        Cow::Owned(strip_grouping(s)?)
    } else {
        Cow::Borrowed(s)
    };
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Removes thousands separators, rejecting commas that are not between digit groups of three
fn strip_grouping(s: &str) -> Option<String> {
    let (integer, fraction) = match s.find('.') {
        Some(i) => s.split_at(i),
        None => (s, ""),
    };
    let digits = integer.strip_prefix(['-', '+']).unwrap_or(integer);
    let mut groups = digits.split(',');
    let leading = groups.next()?;
    if leading.is_empty() || leading.len() > 3 || !leading.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    Some(format!("{}{fraction}", integer.replace(',', "")))
}

fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.naive_utc());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
