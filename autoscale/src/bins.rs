use autoscale_data::Field;

/// Fewest bins ever suggested
pub const MIN_BINS: usize = 2;

/// Suggested histogram bin count for a field.
///
/// Uses the wider of the Freedman-Diaconis and Scott bin widths, so that
/// neither a narrow interquartile range nor a small deviation alone produces
/// an overly fine histogram.
pub fn optimal_bin_count(field: &Field) -> usize {
    let stats = field.stats();
    let Some(stddev) = stats.stddev else {
        return MIN_BINS;
    };

    let cube_root = (stats.valid as f64).cbrt();
    let iqr = match (stats.q1, stats.q3) {
        (Some(q1), Some(q3)) => q3 - q1,
        _ => 0.0,
    };
    let h1 = 2.0 * iqr / cube_root;
    let h2 = 3.5 * stddev / cube_root;
    let h = h1.max(h2);
    if h == 0.0 || !h.is_finite() {
        return MIN_BINS;
    }

    let span = match (stats.min, stats.max) {
        (Some(min), Some(max)) => max - min,
        _ => 0.0,
    };
    let bins = ((span / h + 0.499).round() as usize).max(MIN_BINS);
    tracing::debug!(field = field.name(), h1, h2, bins, "estimated bin count");
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoscale_data::FieldStats;

    #[test]
    fn test_uniform_values() {
        let field = Field::numeric("x", (1..=100).map(|i| Some(f64::from(i))).collect());
        assert_eq!(optimal_bin_count(&field), 5);
    }

    #[test]
    fn test_constant_values() {
        let field = Field::numeric("x", vec![Some(4.0); 10]);
        assert_eq!(optimal_bin_count(&field), MIN_BINS);
    }

    #[test]
    fn test_without_deviation() {
        let field = Field::numeric("x", vec![Some(4.0), None]);
        assert_eq!(optimal_bin_count(&field), MIN_BINS);

        let text = Field::from_text("t", [Some("a"), Some("b")]);
        assert_eq!(optimal_bin_count(&text), MIN_BINS);
    }

    #[test]
    fn test_supplied_statistics() {
        // h1 = 2 * 10 / 10 = 2, h2 = 3.5 * 4 / 10 = 1.4, so 100 / 2 bins
        let field = Field::numeric("x", vec![]).with_stats(FieldStats {
            row_count: 1000,
            valid: 1000,
            min: Some(0.0),
            max: Some(100.0),
            q1: Some(40.0),
            q3: Some(50.0),
            stddev: Some(4.0),
            ..Default::default()
        });
        assert_eq!(optimal_bin_count(&field), 50);
    }

    #[test]
    fn test_never_below_minimum() {
        let field = Field::numeric("x", vec![Some(0.0), Some(0.1), Some(0.2), Some(100.0)]);
        assert!(optimal_bin_count(&field) >= MIN_BINS);
    }
}
