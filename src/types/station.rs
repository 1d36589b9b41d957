//! Station metadata as returned by the station list endpoints, plus the list of
//! Brazilian federative units used to narrow station pickers.

use crate::types::raw_record::RawValue;
use serde::{Deserialize, Serialize};

/// Sentinel state code meaning "do not filter by state".
pub const ALL_STATES: &str = "ALL";

/// State codes (UF) and their display names, `ALL` first.
pub const BRAZILIAN_STATES: &[(&str, &str)] = &[
    (ALL_STATES, "Todos"),
    ("AC", "Acre"),
    ("AL", "Alagoas"),
    ("AP", "Amapá"),
    ("AM", "Amazonas"),
    ("BA", "Bahia"),
    ("CE", "Ceará"),
    ("DF", "Distrito Federal"),
    ("ES", "Espírito Santo"),
    ("GO", "Goiás"),
    ("MA", "Maranhão"),
    ("MT", "Mato Grosso"),
    ("MS", "Mato Grosso do Sul"),
    ("MG", "Minas Gerais"),
    ("PA", "Pará"),
    ("PB", "Paraíba"),
    ("PR", "Paraná"),
    ("PE", "Pernambuco"),
    ("PI", "Piauí"),
    ("RJ", "Rio de Janeiro"),
    ("RN", "Rio Grande do Norte"),
    ("RS", "Rio Grande do Sul"),
    ("RO", "Rondônia"),
    ("RR", "Roraima"),
    ("SC", "Santa Catarina"),
    ("SP", "São Paulo"),
    ("SE", "Sergipe"),
    ("TO", "Tocantins"),
];

/// Looks up the display name of a state code, case-insensitively.
pub fn state_name(code: &str) -> Option<&'static str> {
    BRAZILIAN_STATES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

/// A single weather station from `GET automaticas/` or `GET manuais/`.
///
/// Only the identifying fields are required. Coordinates arrive either as JSON
/// numbers or as text, so they are kept as [`RawValue`] and exposed through
/// the numeric accessors.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StationInfo {
    /// Station code, e.g. `"A001"`. This is what the interval endpoint expects.
    #[serde(rename = "CD_ESTACAO")]
    pub code: String,
    /// Human-readable station name.
    #[serde(rename = "DC_NOME")]
    pub name: String,
    /// Two-letter state code (UF), if reported.
    #[serde(rename = "SG_ESTADO", default)]
    pub state: Option<String>,
    #[serde(rename = "VL_LATITUDE", default)]
    pub latitude: Option<RawValue>,
    #[serde(rename = "VL_LONGITUDE", default)]
    pub longitude: Option<RawValue>,
    #[serde(rename = "VL_ALTITUDE", default)]
    pub altitude: Option<RawValue>,
}

impl StationInfo {
    pub fn latitude_deg(&self) -> Option<f64> {
        self.latitude.as_ref().and_then(RawValue::as_f64)
    }

    pub fn longitude_deg(&self) -> Option<f64> {
        self.longitude.as_ref().and_then(RawValue::as_f64)
    }

    pub fn altitude_m(&self) -> Option<f64> {
        self.altitude.as_ref().and_then(RawValue::as_f64)
    }

    /// Label shown in station pickers: `"NAME (CODE)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

/// Keeps the stations located in `state`. [`ALL_STATES`] keeps everything.
pub fn filter_by_state<'a>(stations: &'a [StationInfo], state: &str) -> Vec<&'a StationInfo> {
    if state.eq_ignore_ascii_case(ALL_STATES) {
        return stations.iter().collect();
    }
    stations
        .iter()
        .filter(|s| {
            s.state
                .as_deref()
                .is_some_and(|uf| uf.eq_ignore_ascii_case(state))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations() -> Vec<StationInfo> {
        serde_json::from_str(
            r#"[
                {"CD_ESTACAO": "A001", "DC_NOME": "BRASILIA", "SG_ESTADO": "DF",
                 "VL_LATITUDE": "-15.78944444", "VL_LONGITUDE": -47.92583332},
                {"CD_ESTACAO": "A701", "DC_NOME": "SAO PAULO - MIRANTE", "SG_ESTADO": "SP"},
                {"CD_ESTACAO": "83377", "DC_NOME": "BRASILIA"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_station_info_accepts_text_and_numeric_coordinates() {
        let list = stations();
        assert_eq!(list[0].latitude_deg(), Some(-15.78944444));
        assert_eq!(list[0].longitude_deg(), Some(-47.92583332));
        assert_eq!(list[1].latitude_deg(), None);
        assert_eq!(list[0].label(), "BRASILIA (A001)");
    }

    #[test]
    fn test_filter_by_state() {
        let list = stations();
        assert_eq!(filter_by_state(&list, "ALL").len(), 3);
        let sp = filter_by_state(&list, "sp");
        assert_eq!(sp.len(), 1);
        assert_eq!(sp[0].code, "A701");
        assert!(filter_by_state(&list, "RS").is_empty());
    }

    #[test]
    fn test_state_name_lookup() {
        assert_eq!(state_name("GO"), Some("Goiás"));
        assert_eq!(state_name("all"), Some("Todos"));
        assert_eq!(state_name("XX"), None);
        assert_eq!(BRAZILIAN_STATES.len(), 28);
    }
}
