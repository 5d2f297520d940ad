use std::thread;

use autoscale_data::convert::{to_date, to_list, to_numeric};
use autoscale_data::{DateUnit, Field, FieldKind, Transform, Value};

#[test]
fn test_transform_cell_is_set_once_across_threads() {
    let field = Field::numeric("x", (0..1000).map(|i| Some(f64::from(i))).collect());
    let candidates = [Transform::Log, Transform::Root, Transform::Linear];

    let chosen: Vec<Transform> = thread::scope(|scope| {
        let handles: Vec<_> = (0..12)
            .map(|i| {
                let field = field.clone();
                scope.spawn(move || field.transform_or_init(|| candidates[i % 3]))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let first = chosen[0];
    assert!(chosen.iter().all(|t| *t == first));
    assert_eq!(field.transform(), Some(first));
}

#[test]
fn test_stats_are_shared_by_clones() {
    let field = Field::numeric("x", vec![Some(3.0), Some(1.0), Some(2.0)]);
    let handle = field.clone();
    assert!(std::ptr::eq(field.stats(), handle.stats()));
    assert_eq!(handle.min(), Some(1.0));
    assert_eq!(handle.max(), Some(3.0));
}

#[test]
fn test_conversions_leave_the_source_alone() {
    let field = Field::from_text("raw", [Some("1,200"), Some("3"), Some("x, y")]).with_label("Raw");

    let numeric = to_numeric(&field);
    assert_eq!(numeric.kind(), FieldKind::Numeric);
    assert_eq!(numeric.value(0), Some(&Value::Number(1200.0)));
    assert_eq!(numeric.value(2), None);

    let lists = to_list(&field);
    assert_eq!(lists.kind(), FieldKind::List);
    assert_eq!(lists.label(), "Raw");
    assert_eq!(
        lists.stats().list_categories,
        Some(["1", "200", "3", "x", "y"].map(String::from).to_vec())
    );

    let dates = to_date(&numeric, Some(DateUnit::Year));
    assert_eq!(dates.date_unit(), Some(DateUnit::Year));
    assert_eq!(dates.valid(), 2);

    assert_eq!(field.kind(), FieldKind::Raw);
    assert_eq!(field.value(0), Some(&Value::from("1,200")));
    assert_eq!(field.transform(), None);
}
