use std::sync::{Arc, OnceLock};

use crate::error::DataError;
use crate::stats::FieldStats;
use crate::types::{DateUnit, FieldKind, Transform};
use crate::value::Value;

#[derive(Debug)]
struct FieldInner {
    name: String,
    label: Option<String>,
    kind: FieldKind,
    date_unit: Option<DateUnit>,
    values: Arc<[Option<Value>]>,
    stats: OnceLock<FieldStats>,
    transform: OnceLock<Transform>,
}

/// A named column of values with lazily computed summary statistics.
///
/// `Field` is a cheap handle: clones share identity, which includes the
/// statistics cache and the transform decision. Apart from that one
/// compute-once transform cell a field never changes; conversions and the
/// `with_*` methods build a new field over the same rows.
#[derive(Debug, Clone)]
pub struct Field {
    inner: Arc<FieldInner>,
}

impl Field {
    /// Creates a raw (untyped) field
    pub fn new(name: impl Into<String>, values: Vec<Option<Value>>) -> Self {
        Self::with_kind(name, FieldKind::Raw, values)
    }

    /// Creates a raw field from text cells, as read from a delimited file
    pub fn from_text<'a>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<&'a str>>,
    ) -> Self {
        Self::new(
            name,
            values.into_iter().map(|v| v.map(Value::from)).collect(),
        )
    }

    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::with_kind(
            name,
            FieldKind::Numeric,
            values.into_iter().map(|v| v.map(Value::Number)).collect(),
        )
    }

    pub fn date(
        name: impl Into<String>,
        values: Vec<Option<Value>>,
        date_unit: Option<DateUnit>,
    ) -> Self {
        Self::build(name.into(), FieldKind::Date, date_unit, values)
    }

    pub fn list(name: impl Into<String>, values: Vec<Option<Value>>) -> Self {
        Self::with_kind(name, FieldKind::List, values)
    }

    /// A field derived by the system (such as a row count) rather than read from data
    pub fn synthetic(name: impl Into<String>, values: Vec<Option<Value>>) -> Self {
        Self::with_kind(name, FieldKind::Synthetic, values)
    }

    pub fn with_kind(name: impl Into<String>, kind: FieldKind, values: Vec<Option<Value>>) -> Self {
        Self::build(name.into(), kind, None, values)
    }

    fn build(
        name: String,
        kind: FieldKind,
        date_unit: Option<DateUnit>,
        values: Vec<Option<Value>>,
    ) -> Self {
        Self {
            inner: Arc::new(FieldInner {
                name,
                label: None,
                kind,
                date_unit,
                values: values.into(),
                stats: OnceLock::new(),
                transform: OnceLock::new(),
            }),
        }
    }

    /// New field over the same rows carrying the given display label
    pub fn with_label(&self, label: impl Into<String>) -> Self {
        self.derive(|inner| inner.label = Some(label.into()))
    }

    pub fn with_date_unit(&self, date_unit: DateUnit) -> Self {
        self.derive(|inner| inner.date_unit = Some(date_unit))
    }

    /// New field over the same rows whose statistics are already known
    pub fn with_stats(&self, stats: FieldStats) -> Self {
        self.derive(|inner| inner.stats = OnceLock::from(stats))
    }

    fn derive(&self, update: impl FnOnce(&mut FieldInner)) -> Self {
        let mut inner = FieldInner {
            name: self.inner.name.clone(),
            label: self.inner.label.clone(),
            kind: self.inner.kind,
            date_unit: self.inner.date_unit,
            values: Arc::clone(&self.inner.values),
            stats: OnceLock::new(),
            transform: OnceLock::new(),
        };
        update(&mut inner);
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Whether two handles refer to the same field
    pub fn ptr_eq(a: &Field, b: &Field) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Display label, falling back to the name
    pub fn label(&self) -> &str {
        self.inner.label.as_deref().unwrap_or(&self.inner.name)
    }

    pub fn kind(&self) -> FieldKind {
        self.inner.kind
    }

    pub fn is_synthetic(&self) -> bool {
        self.inner.kind == FieldKind::Synthetic
    }

    pub fn is_date(&self) -> bool {
        self.inner.kind == FieldKind::Date
    }

    pub fn is_numeric(&self) -> bool {
        self.inner.kind == FieldKind::Numeric
    }

    pub fn is_list(&self) -> bool {
        self.inner.kind == FieldKind::List
    }

    pub fn value(&self, row: usize) -> Option<&Value> {
        self.inner.values.get(row).and_then(Option::as_ref)
    }

    pub fn values(&self) -> &[Option<Value>] {
        &self.inner.values
    }

    pub fn row_count(&self) -> usize {
        self.inner.values.len()
    }

    /// Number of non-missing rows
    pub fn valid(&self) -> usize {
        self.stats().valid
    }

    pub fn stats(&self) -> &FieldStats {
        self.inner
            .stats
            .get_or_init(|| FieldStats::compute(self.inner.kind, &self.inner.values))
    }

    pub fn min(&self) -> Option<f64> {
        self.stats().min
    }

    pub fn max(&self) -> Option<f64> {
        self.stats().max
    }

    /// Calendar unit of a date field: the unit supplied at conversion, or the
    /// natural unit of the field's span
    pub fn date_unit(&self) -> Option<DateUnit> {
        if !self.is_date() {
            return None;
        }
        self.inner.date_unit.or_else(|| {
            let stats = self.stats();
            match (stats.min, stats.max) {
                (Some(min), Some(max)) => Some(DateUnit::for_span(max - min)),
                _ => None,
            }
        })
    }

    /// The cached transform decision, if one has been made
    pub fn transform(&self) -> Option<Transform> {
        self.inner.transform.get().copied()
    }

    /// Records the transform decision. Re-setting the same value is a no-op.
    pub fn set_transform(&self, transform: Transform) -> Result<(), DataError> {
        let existing = *self.inner.transform.get_or_init(|| transform);
        if existing == transform {
            Ok(())
        } else {
            Err(DataError::TransformAlreadySet {
                field: self.name().to_string(),
                existing,
                requested: transform,
            })
        }
    }

    /// Returns the cached transform, computing and storing it first if needed
    pub fn transform_or_init(&self, init: impl FnOnce() -> Transform) -> Transform {
        *self.inner.transform.get_or_init(init)
    }
}
