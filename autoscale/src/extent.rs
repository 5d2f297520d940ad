use autoscale_data::{Field, Transform};
use autoscale_scales::NumericExtent;

use crate::bins::optimal_bin_count;
use crate::transform::define_transform;

/// Combined extent of the fields sharing one axis.
///
/// The range covers every field. The transform is kept only when all fields
/// agree on it, and the date unit comes from the first date field. Returns
/// `None` when no field has numeric values.
pub fn extent_for_fields(fields: &[Field]) -> Option<NumericExtent> {
    let ranged: Vec<(&Field, f64, f64)> = fields
        .iter()
        .filter_map(|field| Some((field, field.min()?, field.max()?)))
        .collect();
    let low = ranged.iter().map(|(_, min, _)| *min).min_by(f64::total_cmp)?;
    let high = ranged.iter().map(|(_, _, max)| *max).max_by(f64::total_cmp)?;

    let mut transforms = ranged.iter().map(|(field, _, _)| define_transform(field));
    let first = transforms.next().unwrap_or_default();
    let transform = if transforms.all(|t| t == first) {
        first
    } else {
        Transform::Linear
    };

    let mut extent = NumericExtent::new(low, high)
        .with_transform(transform)
        .with_optimal_bin_count(
            ranged
                .iter()
                .map(|(field, _, _)| optimal_bin_count(field))
                .max()
                .unwrap_or(2),
        );
    if let Some(date_unit) = fields.iter().find_map(Field::date_unit) {
        extent = extent.with_date_unit(date_unit);
    }
    if let Some(granularity) = ranged
        .iter()
        .filter_map(|(field, _, _)| field.stats().granularity)
        .min_by(f64::total_cmp)
    {
        extent = extent.with_granularity(granularity);
    }
    Some(extent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoscale_data::{DateUnit, FieldStats, Value};

    #[test]
    fn test_single_field() {
        let field = Field::numeric("x", (1..=100).map(|i| Some(f64::from(i))).collect());
        let extent = extent_for_fields(&[field]).unwrap();
        assert_eq!((extent.low, extent.high), (1.0, 100.0));
        assert_eq!(extent.transform, Transform::Linear);
        assert_eq!(extent.optimal_bin_count, 5);
        assert_eq!(extent.granularity, Some(1.0));
        assert_eq!(extent.date_unit, None);
    }

    #[test]
    fn test_fields_are_combined() {
        let a = Field::numeric("a", vec![Some(2.0), Some(4.0)]);
        let b = Field::numeric("b", vec![Some(-1.0), Some(3.0), Some(3.5)]);
        let text = Field::from_text("t", [Some("x")]);
        let extent = extent_for_fields(&[a, text, b]).unwrap();
        assert_eq!((extent.low, extent.high), (-1.0, 4.0));
        assert_eq!(extent.granularity, Some(0.5));
    }

    #[test]
    fn test_disagreeing_transforms_fall_back_to_linear() {
        let log = Field::numeric("a", vec![Some(1.0)]).with_stats(FieldStats {
            valid: 1,
            row_count: 1,
            min: Some(1.0),
            max: Some(1000.0),
            skew: Some(3.0),
            ..Default::default()
        });
        let plain = Field::numeric("b", vec![Some(1.0), Some(2.0)]);
        let extent = extent_for_fields(&[log.clone(), plain]).unwrap();
        assert_eq!(extent.transform, Transform::Linear);

        let extent = extent_for_fields(&[log]).unwrap();
        assert_eq!(extent.transform, Transform::Log);
    }

    #[test]
    fn test_date_unit_from_date_field() {
        let dates = Field::date(
            "d",
            vec![Some(Value::Number(0.0)), Some(Value::Number(3650.0))],
            Some(DateUnit::Year),
        );
        let extent = extent_for_fields(&[dates]).unwrap();
        assert_eq!(extent.date_unit, Some(DateUnit::Year));
    }

    #[test]
    fn test_no_numeric_fields() {
        assert_eq!(extent_for_fields(&[]), None);
        assert_eq!(extent_for_fields(&[Field::from_text("t", [Some("x")])]), None);
    }
}
