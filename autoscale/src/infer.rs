//! Inferring the kind of data a field holds.
//!
//! [`convert`] tries, in order, lists, numbers (including year-like numbers,
//! which become dates) and dates. Numeric and date detection look at a random
//! sample of the field, so a few bad cells do not block a conversion.

use autoscale_data::convert::{as_date, as_numeric, to_date, to_list, to_numeric};
use autoscale_data::{DateUnit, Field, Value};
use rand::seq::SliceRandom;
use rand::Rng;

/// Share of sampled values that must convert for the field to be converted
pub const FRACTION_TO_CONVERT: f64 = 0.5;
/// Most non-missing values inspected per conversion attempt
pub const SAMPLE_SIZE: usize = 50;
/// Lowest lower quartile of a field read as years
pub const YEAR_LOW: f64 = 1600.0;
/// Highest upper quartile of a field read as years
pub const YEAR_HIGH: f64 = 2100.0;
/// Largest distance from a whole number at which a granularity still counts as integral
pub const INTEGER_TOLERANCE: f64 = 1e-6;
/// Below this many valid rows, differing list lengths alone accept a list field
pub const SMALL_LIST_SAMPLE: usize = 20;
/// Fewest valid rows a list field needs
pub const MIN_LIST_ROWS: usize = 3;

/// Converts a field to the kind its values suggest, sampling with the thread
/// random number generator.
pub fn convert(field: &Field) -> Field {
    convert_with_rng(field, &mut rand::thread_rng())
}

/// Converts a field to the kind its values suggest.
///
/// Returns the input itself (the same handle) when it is already typed or no
/// conversion applies.
#[tracing::instrument(skip_all, fields(field = field.name()))]
pub fn convert_with_rng<R: Rng + ?Sized>(field: &Field, rng: &mut R) -> Field {
    if field.is_synthetic() || field.is_date() || field.is_list() {
        return field.clone();
    }

    let lists = to_list(field);
    if good_lists(&lists) {
        tracing::debug!("converted to list");
        return lists;
    }

    let order = random_order(field.row_count(), rng);

    let numeric = if field.is_numeric() {
        Some(field.clone())
    } else if sample_matches(field, &order, "numeric", |value| {
        !value.is_date() && as_numeric(value).is_some()
    }) {
        Some(to_numeric(field))
    } else {
        None
    };
    if let Some(numeric) = numeric {
        if is_yearly(&numeric) {
            tracing::debug!("converted to yearly dates");
            return to_date(&numeric, Some(DateUnit::Year));
        }
        return numeric;
    }

    if sample_matches(field, &order, "date", |value| as_date(value).is_some()) {
        return to_date(field, None);
    }
    field.clone()
}

/// Row indices in a uniformly random order
fn random_order<R: Rng + ?Sized>(row_count: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..row_count).collect();
    order.shuffle(rng);
    order
}

/// Whether more than [`FRACTION_TO_CONVERT`] of the first [`SAMPLE_SIZE`]
/// non-missing values, visited in `order`, satisfy `matches`
fn sample_matches(
    field: &Field,
    order: &[usize],
    target: &str,
    matches: impl Fn(&Value) -> bool,
) -> bool {
    let sample: Vec<&Value> = order
        .iter()
        .filter_map(|row| field.value(*row))
        .take(SAMPLE_SIZE)
        .collect();
    let hits = sample.iter().filter(|value| matches(**value)).count();
    let sampled = sample.len();
    tracing::debug!(sampled, hits, target, "sampled values");
    hits as f64 > FRACTION_TO_CONVERT * sampled as f64
}

/// Whether a field converted to lists is worth keeping as a list field.
///
/// Lists of one constant length are more likely ordinary text (or numbers
/// with a thousands separator) than multi-valued cells. On larger fields the
/// items must also repeat enough to form a small set of categories.
pub fn good_lists(field: &Field) -> bool {
    let valid = field.valid();
    if valid < MIN_LIST_ROWS {
        return false;
    }

    let mut lengths = field.values().iter().skip(1).filter_map(|value| match value {
        Some(Value::List(items)) => Some(items.len()),
        _ => None,
    });
    let Some(first) = lengths.next() else {
        return false;
    };
    if lengths.all(|len| len == first) {
        return false;
    }

    if valid < SMALL_LIST_SAMPLE {
        return true;
    }
    let categories = field
        .stats()
        .list_categories
        .as_ref()
        .map_or(0, Vec::len);
    categories * categories < valid * 2
}

/// Whether a numeric field looks like calendar years: its middle half lies in
/// a plausible range of years and its values are whole numbers.
pub fn is_yearly(field: &Field) -> bool {
    let stats = field.stats();
    match (stats.q1, stats.q3) {
        (Some(q1), Some(q3)) if q1 >= YEAR_LOW && q3 <= YEAR_HIGH => stats
            .granularity
            .is_some_and(|g| (g - g.round()).abs() < INTEGER_TOLERANCE),
        _ => false,
    }
}
