use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{IntoEnumIterator, VariantNames};

use crate::error::DataError;

/// Semantic kind of a field
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Raw,
    Numeric,
    Date,
    List,
    Synthetic,
}

impl FromStr for FieldKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s).ok_or_else(|| DataError::UnknownFieldKind(s.to_string()))
    }
}

/// Monotonic re-expression of a numeric domain
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Transform {
    #[default]
    Linear,
    Log,
    Root,
}

impl FromStr for Transform {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s).ok_or_else(|| DataError::UnknownTransform(s.to_string()))
    }
}

/// Calendar unit of a date field or date axis.
///
/// Variants are declared from finest to coarsest, so the derived ordering
/// compares granularity.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DateUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
    Decade,
    Century,
}

impl DateUnit {
    /// Approximate length of one unit in days
    pub fn approx_days(&self) -> f64 {
        match self {
            DateUnit::Second => 1.0 / 86_400.0,
            DateUnit::Minute => 1.0 / 1_440.0,
            DateUnit::Hour => 1.0 / 24.0,
            DateUnit::Day => 1.0,
            DateUnit::Week => 7.0,
            DateUnit::Month => 365.25 / 12.0,
            DateUnit::Quarter => 365.25 / 4.0,
            DateUnit::Year => 365.25,
            DateUnit::Decade => 3_652.5,
            DateUnit::Century => 36_525.0,
        }
    }

    /// Coarsest unit that still fits at least three times into a span of `days`
    pub fn for_span(days: f64) -> Self {
        if !(days > 0.0) {
            return DateUnit::Day;
        }
        DateUnit::iter()
            .rev()
            .find(|unit| days / unit.approx_days() >= 3.0)
            .unwrap_or(DateUnit::Second)
    }
}

impl FromStr for DateUnit {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s).ok_or_else(|| DataError::UnknownDateUnit(s.to_string()))
    }
}

fn parse_variant<T: IntoEnumIterator + std::fmt::Display>(s: &str) -> Option<T> {
    let s = s.trim();
    T::iter().find(|variant| variant.to_string().eq_ignore_ascii_case(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_transform_round_trip() -> Result<(), DataError> {
        for name in Transform::VARIANTS {
            let transform: Transform = name.parse()?;
            assert_eq!(transform.to_string(), *name);
        }
        assert_eq!("LOG".parse::<Transform>()?, Transform::Log);
        Ok(())
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(
            "cube".parse::<Transform>(),
            Err(DataError::UnknownTransform("cube".to_string()))
        );
        assert_eq!(
            "fortnight".parse::<DateUnit>(),
            Err(DataError::UnknownDateUnit("fortnight".to_string()))
        );
        assert_eq!(
            "matrix".parse::<FieldKind>(),
            Err(DataError::UnknownFieldKind("matrix".to_string()))
        );
    }

    #[test]
    fn test_date_unit_ordering() {
        assert!(DateUnit::Second < DateUnit::Day);
        assert!(DateUnit::Quarter < DateUnit::Year);
        assert!(DateUnit::Century > DateUnit::Decade);
    }

    #[rstest]
    #[case(0.0, DateUnit::Day)]
    #[case(0.5, DateUnit::Hour)]
    #[case(10.0, DateUnit::Day)]
    #[case(120.0, DateUnit::Month)]
    #[case(365.25 * 15.0, DateUnit::Year)]
    #[case(365.25 * 40.0, DateUnit::Decade)]
    #[case(365.25 * 500.0, DateUnit::Century)]
    fn test_date_unit_for_span(#[case] days: f64, #[case] expected: DateUnit) {
        assert_eq!(DateUnit::for_span(days), expected);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&DateUnit::Quarter).unwrap(),
            "\"quarter\""
        );
        assert_eq!(
            serde_json::from_str::<Transform>("\"root\"").unwrap(),
            Transform::Root
        );
    }
}
