//! Derives the column → sub-column configuration used by table and export
//! consumers from the shape of the first normalized row.

use crate::transform::normalize::HOUR;
use crate::types::frequency::Frequency;
use crate::types::row::{CategoryValue, NormalizedRow};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Ordered mapping from category name to its ordered sub-labels.
///
/// Scalar categories map to `[""]`, meaning "no sub-header, render the value
/// directly".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderConfig {
    entries: Vec<(String, Vec<String>)>,
}

impl HeaderConfig {
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == category)
            .map(|(_, v)| v.as_slice())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a category has real sub-columns (as opposed to the `[""]` marker).
    pub fn is_grouped(&self, category: &str) -> bool {
        self.get(category)
            .is_some_and(|subs| !(subs.len() == 1 && subs[0].is_empty()))
    }
}

impl Serialize for HeaderConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Builds the header configuration from `rows[0]`.
///
/// Only the first row is inspected; all rows of a fetch are expected to share its
/// shape. An empty slice yields an empty configuration.
pub fn derive_header_config(rows: &[NormalizedRow]) -> HeaderConfig {
    let Some(first) = rows.first() else {
        return HeaderConfig::default();
    };

    let entries = first
        .iter()
        .map(|(category, value)| {
            let subs = match value {
                CategoryValue::Group(entries) => entries.iter().map(|(k, _)| k.clone()).collect(),
                CategoryValue::Scalar(_) => vec![String::new()],
            };
            (category.to_string(), subs)
        })
        .collect();

    HeaderConfig { entries }
}

/// Columns to display for a query of the given frequency.
///
/// `"Hora Medição"` is only meaningful for hourly queries and is dropped otherwise.
pub fn visible_columns(config: &HeaderConfig, frequency: Frequency) -> Vec<String> {
    config
        .columns()
        .filter(|c| frequency == Frequency::Hourly || *c != HOUR)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::normalize::normalize_json;
    use crate::types::frequency::StationType;
    use serde_json::json;

    fn rows() -> Vec<NormalizedRow> {
        vec![
            normalize_json(json!({"DC_NOME": "A"}), StationType::Automatic),
            normalize_json(json!({"DC_NOME": "B"}), StationType::Automatic),
        ]
    }

    #[test]
    fn test_derive_header_config_from_first_row() {
        let config = derive_header_config(&rows());
        assert_eq!(config.len(), 13);
        assert_eq!(config.get("Nome"), Some(&[String::new()][..]));
        assert_eq!(
            config.get("Vento").unwrap(),
            ["Vel. (m/s)", "Dir.", "Raj. (m/s)"]
        );
        assert!(config.is_grouped("Temperatura"));
        assert!(!config.is_grouped("Latitude"));
    }

    #[test]
    fn test_derive_header_config_is_idempotent() {
        let rows = rows();
        assert_eq!(derive_header_config(&rows), derive_header_config(&rows));
    }

    #[test]
    fn test_empty_rows_yield_empty_config() {
        assert!(derive_header_config(&[]).is_empty());
    }

    #[test]
    fn test_every_config_cell_is_addressable() {
        let rows = rows();
        let config = derive_header_config(&rows);
        for row in &rows {
            for (column, subs) in config.iter() {
                for sub in subs {
                    assert!(row.cell(column, sub).is_some(), "{column} / {sub}");
                }
            }
        }
    }

    #[test]
    fn test_visible_columns_drop_hour_unless_hourly() {
        let config = derive_header_config(&rows());
        let hourly = visible_columns(&config, Frequency::Hourly);
        assert!(hourly.iter().any(|c| c == HOUR));

        let daily = visible_columns(&config, Frequency::Daily);
        assert!(!daily.iter().any(|c| c == HOUR));
        assert_eq!(daily.len(), hourly.len() - 1);
        assert_eq!(daily[0], "Nome");
    }

    #[test]
    fn test_serialize_header_config() {
        let row = NormalizedRow::new()
            .with("Nome", "X")
            .with("Chuva", CategoryValue::group([("(mm)", 1.0)]));
        let json = serde_json::to_string(&derive_header_config(&[row])).unwrap();
        assert_eq!(json, r#"{"Nome":[""],"Chuva":["(mm)"]}"#);
    }
}
