//! The unified nested row shared by both station families.
//!
//! A [`NormalizedRow`] is an ordered list of categories ("Temperatura", "Chuva",
//! ...). Each category is either a plain scalar (name, date, coordinates) or a
//! group of named sub-values ("Inst.", "Max.", "Min."). Order is significant: it
//! drives column order in tables and exports.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// Placeholder shown for a cell with no value.
pub const MISSING_CELL: &str = "—";

#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Number(f64),
    Text(String),
}

impl ScalarValue {
    /// Returns the number if this is a finite numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ScalarValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) => Some(s),
            ScalarValue::Number(_) => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Number(n) => write!(f, "{}", n),
            ScalarValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Number(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Text(value)
    }
}

impl Serialize for ScalarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ScalarValue::Number(n) => serializer.serialize_f64(*n),
            ScalarValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Value of one category in a row.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryValue {
    Scalar(ScalarValue),
    /// Named sub-values in insertion order.
    Group(Vec<(String, ScalarValue)>),
}

impl CategoryValue {
    /// Builds a group from `(label, value)` pairs.
    pub fn group<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ScalarValue>,
    {
        CategoryValue::Group(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Looks up a sub-value. Scalars have no sub-values.
    pub fn sub_value(&self, label: &str) -> Option<&ScalarValue> {
        match self {
            CategoryValue::Group(entries) => entries
                .iter()
                .find(|(k, _)| k == label)
                .map(|(_, v)| v),
            CategoryValue::Scalar(_) => None,
        }
    }

    /// Sub-labels in order; empty for scalars.
    pub fn sub_labels(&self) -> Vec<&str> {
        match self {
            CategoryValue::Group(entries) => entries.iter().map(|(k, _)| k.as_str()).collect(),
            CategoryValue::Scalar(_) => Vec::new(),
        }
    }
}

impl From<ScalarValue> for CategoryValue {
    fn from(value: ScalarValue) -> Self {
        CategoryValue::Scalar(value)
    }
}

impl From<f64> for CategoryValue {
    fn from(value: f64) -> Self {
        CategoryValue::Scalar(value.into())
    }
}

impl From<&str> for CategoryValue {
    fn from(value: &str) -> Self {
        CategoryValue::Scalar(value.into())
    }
}

impl From<String> for CategoryValue {
    fn from(value: String) -> Self {
        CategoryValue::Scalar(value.into())
    }
}

impl Serialize for CategoryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CategoryValue::Scalar(value) => value.serialize(serializer),
            CategoryValue::Group(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// Category/sub-label skeleton of a row, used to check that a dataset is uniform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowShape(pub Vec<(String, Vec<String>)>);

/// A normalized ("header") row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRow {
    entries: Vec<(String, CategoryValue)>,
}

impl NormalizedRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a category, or replaces it in place if the name already exists.
    pub fn insert(&mut self, category: impl Into<String>, value: impl Into<CategoryValue>) {
        let category = category.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == category) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((category, value)),
        }
    }

    /// Builder-style variant of [`NormalizedRow::insert`].
    pub fn with(mut self, category: impl Into<String>, value: impl Into<CategoryValue>) -> Self {
        self.insert(category, value);
        self
    }

    pub fn get(&self, category: &str) -> Option<&CategoryValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == category)
            .map(|(_, v)| v)
    }

    /// Text of a scalar category, e.g. the measurement date.
    pub fn text(&self, category: &str) -> Option<&str> {
        match self.get(category)? {
            CategoryValue::Scalar(value) => value.as_text(),
            CategoryValue::Group(_) => None,
        }
    }

    /// Value of one table cell. An empty `sub_label` addresses a scalar category.
    pub fn cell(&self, category: &str, sub_label: &str) -> Option<&ScalarValue> {
        match self.get(category)? {
            CategoryValue::Scalar(value) if sub_label.is_empty() => Some(value),
            CategoryValue::Scalar(_) => None,
            CategoryValue::Group(_) if sub_label.is_empty() => None,
            group => group.sub_value(sub_label),
        }
    }

    /// Cell rendered for display; missing cells render as [`MISSING_CELL`].
    pub fn display_cell(&self, category: &str, sub_label: &str) -> String {
        self.cell(category, sub_label)
            .map(ToString::to_string)
            .unwrap_or_else(|| MISSING_CELL.to_string())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn shape(&self) -> RowShape {
        RowShape(
            self.entries
                .iter()
                .map(|(k, v)| {
                    (
                        k.clone(),
                        v.sub_labels().into_iter().map(str::to_string).collect(),
                    )
                })
                .collect(),
        )
    }
}

impl Serialize for NormalizedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Returns the index of the first row whose shape differs from the first row's,
/// or `None` when all rows share one shape.
pub fn check_uniform_shape(rows: &[NormalizedRow]) -> Option<usize> {
    let first = rows.first()?.shape();
    rows.iter()
        .enumerate()
        .skip(1)
        .find(|(_, row)| row.shape() != first)
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> NormalizedRow {
        NormalizedRow::new()
            .with("Nome", "X")
            .with(
                "Temperatura",
                CategoryValue::group([("Inst.", 25.3), ("Max.", 26.0)]),
            )
    }

    #[test]
    fn test_cell_lookup() {
        let row = sample_row();
        assert_eq!(row.cell("Nome", ""), Some(&ScalarValue::from("X")));
        assert_eq!(
            row.cell("Temperatura", "Max."),
            Some(&ScalarValue::Number(26.0))
        );
        assert_eq!(row.cell("Temperatura", "Min."), None);
        assert_eq!(row.cell("Temperatura", ""), None);
        assert_eq!(row.cell("Nome", "Inst."), None);
        assert_eq!(row.cell("Vento", "Dir."), None);
    }

    #[test]
    fn test_display_cell_renders_missing_as_dash() {
        let row = sample_row();
        assert_eq!(row.display_cell("Temperatura", "Inst."), "25.3");
        assert_eq!(row.display_cell("Chuva", "(mm)"), MISSING_CELL);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut row = sample_row();
        row.insert("Nome", "Y");
        assert_eq!(row.categories().collect::<Vec<_>>(), ["Nome", "Temperatura"]);
        assert_eq!(row.text("Nome"), Some("Y"));
    }

    #[test]
    fn test_serialize_preserves_order() {
        let json = serde_json::to_string(&sample_row()).unwrap();
        assert_eq!(
            json,
            r#"{"Nome":"X","Temperatura":{"Inst.":25.3,"Max.":26.0}}"#
        );
    }

    #[test]
    fn test_check_uniform_shape() {
        let rows = vec![sample_row(), sample_row()];
        assert_eq!(check_uniform_shape(&rows), None);
        assert_eq!(check_uniform_shape(&[]), None);

        let odd = sample_row().with("Chuva", CategoryValue::group([("(mm)", 0.0)]));
        let rows = vec![sample_row(), sample_row(), odd];
        assert_eq!(check_uniform_shape(&rows), Some(2));
    }
}
