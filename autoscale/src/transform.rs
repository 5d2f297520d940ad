use autoscale_data::{Field, Transform};

/// Skew above which a widely spread positive field is shown on a log scale
pub const LOG_SKEW: f64 = 2.0;
/// Minimum ratio of max to min for a log scale
pub const LOG_SPREAD: f64 = 75.0;
/// Skew above which a non-negative field is shown on a root scale
pub const ROOT_SKEW: f64 = 1.0;

/// Transform that best shows a distribution with the given skew and extremes.
///
/// Log wins over root when both apply. A missing bound fails every check that
/// reads it.
pub fn transform_for_skew(skew: Option<f64>, min: Option<f64>, max: Option<f64>) -> Transform {
    let Some(skew) = skew else {
        return Transform::Linear;
    };
    let positive_min = min.filter(|min| *min > 0.0);
    match (positive_min, max) {
        (Some(min), Some(max)) if skew > LOG_SKEW && max > LOG_SPREAD * min => Transform::Log,
        _ if skew > ROOT_SKEW && min.is_some_and(|min| min >= 0.0) => Transform::Root,
        _ => Transform::Linear,
    }
}

/// The field's transform, choosing and caching it on first use.
///
/// Every later call, from any clone of the field, returns the cached choice.
pub fn define_transform(field: &Field) -> Transform {
    field.transform_or_init(|| {
        let stats = field.stats();
        let transform = transform_for_skew(stats.skew, stats.min, stats.max);
        tracing::debug!(field = field.name(), skew = ?stats.skew, %transform, "chose transform");
        transform
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoscale_data::FieldStats;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some(1.0), Some(1000.0), Transform::Linear)]
    #[case(Some(3.5), Some(1.0), Some(1000.0), Transform::Log)]
    #[case(Some(3.5), Some(1.0), Some(50.0), Transform::Root)]
    #[case(Some(3.5), Some(0.0), Some(1000.0), Transform::Root)]
    #[case(Some(1.5), Some(0.0), Some(50.0), Transform::Root)]
    #[case(Some(1.5), Some(-1.0), Some(50.0), Transform::Linear)]
    #[case(Some(1.0), Some(0.0), Some(50.0), Transform::Linear)]
    #[case(Some(3.5), None, Some(1000.0), Transform::Linear)]
    #[case(Some(3.5), Some(1.0), None, Transform::Root)]
    #[case(Some(-2.5), Some(1.0), Some(1000.0), Transform::Linear)]
    fn test_transform_for_skew(
        #[case] skew: Option<f64>,
        #[case] min: Option<f64>,
        #[case] max: Option<f64>,
        #[case] expected: Transform,
    ) {
        assert_eq!(transform_for_skew(skew, min, max), expected);
    }

    #[test]
    fn test_define_transform_is_cached() {
        let field = Field::numeric("x", vec![Some(1.0)]).with_stats(FieldStats {
            row_count: 1,
            valid: 1,
            skew: Some(3.5),
            min: Some(1.0),
            max: Some(1000.0),
            ..Default::default()
        });
        assert_eq!(define_transform(&field), Transform::Log);
        assert_eq!(field.transform(), Some(Transform::Log));
        assert_eq!(define_transform(&field.clone()), Transform::Log);
    }

    #[test]
    fn test_existing_decision_wins() {
        let field = Field::numeric("x", vec![Some(1.0), Some(2.0), Some(900.0)]);
        field.set_transform(Transform::Linear).unwrap();
        assert_eq!(define_transform(&field), Transform::Linear);
    }
}
