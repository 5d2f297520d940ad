use indexmap::IndexSet;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::types::FieldKind;
use crate::value::{date_to_days, Value};

/// Summary statistics of a field.
///
/// Numeric statistics are computed over numbers and over dates (as days since
/// the epoch). Text and list cells never contribute to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub row_count: usize,
    /// Number of non-missing rows
    pub valid: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    /// Sample standard deviation, absent with fewer than two numeric values
    pub stddev: Option<f64>,
    pub skew: Option<f64>,
    /// Smallest positive gap between distinct numeric values
    pub granularity: Option<f64>,
    /// Distinct list items in order of first appearance (list fields only)
    pub list_categories: Option<Vec<String>>,
}

impl FieldStats {
    pub fn compute(kind: FieldKind, values: &[Option<Value>]) -> Self {
        let mut stats = FieldStats {
            row_count: values.len(),
            valid: values.iter().filter(|v| v.is_some()).count(),
            list_categories: (kind == FieldKind::List).then(|| list_categories(values)),
            ..Default::default()
        };

        let mut numbers: Vec<f64> = values
            .iter()
            .flatten()
            .filter_map(numeric_view)
            .filter(|v| v.is_finite())
            .collect();
        if numbers.is_empty() {
            return stats;
        }
        numbers.sort_by(f64::total_cmp);

        let n = numbers.len() as f64;
        let mean = numbers.iter().sum::<f64>() / n;
        stats.min = numbers.first().copied();
        stats.max = numbers.last().copied();
        stats.mean = Some(mean);
        stats.q1 = Some(quantile(&numbers, 0.25));
        stats.median = Some(quantile(&numbers, 0.5));
        stats.q3 = Some(quantile(&numbers, 0.75));

        if numbers.len() >= 2 {
            let variance = numbers.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            let stddev = variance.sqrt();
            stats.stddev = Some(stddev);
            if stddev > 0.0 {
                let third_moment = numbers.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / n;
                stats.skew = Some(third_moment / stddev.powi(3));
            }
        }

        stats.granularity = granularity(&numbers);
        stats
    }
}

fn numeric_view(value: &Value) -> Option<f64> {
    match value {
        Value::Number(v) => Some(*v),
        Value::Date(d) => Some(date_to_days(*d)),
        Value::Text(_) | Value::List(_) => None,
    }
}

/// Linearly interpolated quantile of sorted, non-empty values
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

fn granularity(sorted: &[f64]) -> Option<f64> {
    let mut distinct: Vec<OrderedFloat<f64>> = sorted.iter().copied().map(OrderedFloat).collect();
    distinct.dedup();
    distinct
        .windows(2)
        .map(|pair| pair[1].0 - pair[0].0)
        .filter(|gap| *gap > 0.0)
        .min_by(f64::total_cmp)
}

fn list_categories(values: &[Option<Value>]) -> Vec<String> {
    let mut categories = IndexSet::new();
    for value in values.iter().flatten() {
        if let Value::List(items) = value {
            for item in items.iter() {
                if !categories.contains(item) {
                    categories.insert(item.to_string());
                }
            }
        }
    }
    categories.into_iter().collect()
}
