use crate::types::metric::Metric;
use crate::types::row::{CategoryValue, NormalizedRow};

/// Returns the first sub-value among `aliases` that holds a finite number.
///
/// Automatic and manual rows spell their sub-labels differently (`"Max."` vs
/// `"Max"`, `"Inst."` vs `"Med."`), so callers list every spelling in preference
/// order. Scalars, text sub-values and absent categories yield `None`.
///
/// # Examples
///
/// ```
/// use inmet::{extract_numeric_value, CategoryValue};
///
/// let temp = CategoryValue::group([("Max.", 30.0), ("Min.", 20.0)]);
/// assert_eq!(extract_numeric_value(Some(&temp), &["Max", "Max."]), Some(30.0));
/// assert_eq!(extract_numeric_value(None, &["Max."]), None);
/// ```
pub fn extract_numeric_value(value: Option<&CategoryValue>, aliases: &[&str]) -> Option<f64> {
    let value = value?;
    aliases
        .iter()
        .filter_map(|alias| value.sub_value(alias))
        .find_map(|v| v.as_number())
}

/// Reads a metric from a row using its source category and aliases.
pub fn metric_value(row: &NormalizedRow, metric: Metric) -> Option<f64> {
    extract_numeric_value(row.get(metric.source_category()), metric.aliases())
}
