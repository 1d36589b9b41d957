//! Flattening of nested rows into the key/value records consumed by the
//! CSV, spreadsheet and PDF encoders.

use crate::transform::normalize::DATE;
use crate::types::row::{CategoryValue, NormalizedRow, ScalarValue};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Separator between a category and its sub-label in flattened keys.
pub const KEY_SEPARATOR: &str = " - ";

/// One flat export record. Keys keep the order of the source row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord {
    entries: Vec<(String, ScalarValue)>,
}

impl FlatRecord {
    pub fn get(&self, key: &str) -> Option<&ScalarValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn headers(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FlatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Flattens every row.
///
/// Grouped categories expand to one `"{category} - {sub}"` key per sub-value;
/// scalar categories keep their name. The measurement date is rewritten with
/// [`format_date`].
///
/// # Examples
///
/// ```
/// use inmet::{flatten, CategoryValue, NormalizedRow};
///
/// let row = NormalizedRow::new()
///     .with("Nome", "X")
///     .with("Temperatura", CategoryValue::group([("Inst.", 25.3), ("Max.", 26.0)]));
/// let flat = flatten(&[row]);
/// assert_eq!(flat[0].headers(), ["Nome", "Temperatura - Inst.", "Temperatura - Max."]);
/// ```
pub fn flatten(rows: &[NormalizedRow]) -> Vec<FlatRecord> {
    rows.iter().map(|row| flatten_row(row, |_| true)).collect()
}

/// Flattens only the categories listed in `columns`, typically the visible
/// columns of a dataset. Row order of categories is kept.
pub fn flatten_columns(rows: &[NormalizedRow], columns: &[String]) -> Vec<FlatRecord> {
    rows.iter()
        .map(|row| flatten_row(row, |category| columns.iter().any(|c| c == category)))
        .collect()
}

fn flatten_row(row: &NormalizedRow, keep: impl Fn(&str) -> bool) -> FlatRecord {
    let mut entries = Vec::new();
    for (category, value) in row.iter().filter(|entry| keep(entry.0)) {
        match value {
            CategoryValue::Scalar(ScalarValue::Text(text)) if category == DATE => {
                entries.push((category.to_string(), ScalarValue::Text(format_date(text))));
            }
            CategoryValue::Scalar(scalar) => entries.push((category.to_string(), scalar.clone())),
            CategoryValue::Group(subs) => {
                for (sub, scalar) in subs {
                    entries.push((format!("{category}{KEY_SEPARATOR}{sub}"), scalar.clone()));
                }
            }
        }
    }
    FlatRecord { entries }
}

/// Column headers of a flattened dataset: the keys of the first record.
pub fn flat_headers(records: &[FlatRecord]) -> Vec<String> {
    records
        .first()
        .map(|r| r.headers().into_iter().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Rewrites `YYYY-MM-DD` as `DD/MM/YYYY`.
///
/// A trailing time (`"2024-03-05 12:00"`) is kept after the date. Values that
/// already contain a `/` and values that are not three dash-separated parts are
/// returned unchanged, so applying it twice is the same as applying it once.
pub fn format_date(date: &str) -> String {
    if date.is_empty() || date.contains('/') {
        return date.to_string();
    }

    let (day_part, rest) = match date.find([' ', 'T']) {
        Some(i) => date.split_at(i),
        None => (date, ""),
    };
    let parts: Vec<&str> = day_part.split('-').collect();
    match parts.as_slice() {
        [year, month, day] if !year.is_empty() && !month.is_empty() && !day.is_empty() => {
            let time = rest.trim_start_matches(['T', ' ']);
            if time.is_empty() {
                format!("{day}/{month}/{year}")
            } else {
                format!("{day}/{month}/{year} {time}")
            }
        }
        _ => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::header_config::derive_header_config;
    use crate::transform::normalize::normalize_json;
    use crate::types::frequency::StationType;
    use serde_json::json;

    #[test]
    fn test_flatten_example() {
        let row = NormalizedRow::new().with("Nome", "X").with(
            "Temperatura",
            CategoryValue::group([("Inst.", 25.3), ("Max.", 26.0)]),
        );
        let flat = flatten(&[row]);
        assert_eq!(flat.len(), 1);
        assert_eq!(
            serde_json::to_string(&flat[0]).unwrap(),
            r#"{"Nome":"X","Temperatura - Inst.":25.3,"Temperatura - Max.":26.0}"#
        );
    }

    #[test]
    fn test_scalars_pass_through() {
        let row = NormalizedRow::new()
            .with("Nome", "X")
            .with("Latitude", -15.5)
            .with("UF", "DF");
        let flat = flatten(&[row.clone()]);
        for (key, value) in row.iter() {
            let CategoryValue::Scalar(scalar) = value else {
                unreachable!()
            };
            assert_eq!(flat[0].get(key), Some(scalar));
        }
        assert_eq!(flat[0].len(), row.len());
    }

    #[test]
    fn test_flatten_formats_measurement_date() {
        let rows = vec![normalize_json(
            json!({"DT_MEDICAO": "2024-03-05", "TEM_INS": "22.0"}),
            StationType::Automatic,
        )];
        let flat = flatten(&rows);
        assert_eq!(flat[0].get(DATE), Some(&ScalarValue::from("05/03/2024")));
        assert_eq!(flat[0].get("Temperatura - Inst."), Some(&ScalarValue::Number(22.0)));
        assert_eq!(flat[0].get("Hora Medição - UTC"), Some(&ScalarValue::from("")));
    }

    #[test]
    fn test_headers_follow_header_config() {
        let rows = vec![normalize_json(json!({}), StationType::Manual)];
        let config = derive_header_config(&rows);
        let expected: Vec<String> = config
            .iter()
            .flat_map(|(column, subs)| {
                subs.iter().map(move |sub| {
                    if sub.is_empty() {
                        column.to_string()
                    } else {
                        format!("{column} - {sub}")
                    }
                })
            })
            .collect();
        assert_eq!(flat_headers(&flatten(&rows)), expected);
    }

    #[test]
    fn test_flatten_columns_skips_hidden_categories() {
        let rows = vec![normalize_json(
            json!({"DC_NOME": "BRASILIA", "HR_MEDICAO": "1200", "DT_MEDICAO": "2024-03-05"}),
            StationType::Automatic,
        )];
        let columns = vec!["Nome".to_string(), DATE.to_string(), "Chuva".to_string()];
        let flat = flatten_columns(&rows, &columns);
        assert_eq!(flat[0].headers(), ["Nome", DATE, "Chuva - (mm)"]);
        assert_eq!(flat[0].get("Hora Medição - UTC"), None);
        assert_eq!(flat[0].get(DATE), Some(&ScalarValue::from("05/03/2024")));
    }

    #[test]
    fn test_empty_input() {
        assert!(flatten(&[]).is_empty());
        assert!(flat_headers(&[]).is_empty());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05"), "05/03/2024");
        assert_eq!(format_date("05/03/2024"), "05/03/2024");
        assert_eq!(format_date("2024-03-05 12:00"), "05/03/2024 12:00");
        assert_eq!(format_date("2024-03-05T12:00"), "05/03/2024 12:00");
        assert_eq!(format_date("2024-03"), "2024-03");
        assert_eq!(format_date(""), "");
        for input in ["2024-03-05", "2024-03-05 12:00", "garbage"] {
            let once = format_date(input);
            assert_eq!(format_date(&once), once);
        }
    }
}
