//! Raw station records as delivered by the interval endpoint.
//!
//! The API serves two different record schemas depending on the station type and
//! does not say which one it sent, so the caller picks the variant. Every field is
//! optional and may arrive as text or as a JSON number.

use crate::types::frequency::StationType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single upstream value, normally text or a JSON number.
///
/// Any other JSON type lands in `Other` so that one malformed field does not
/// reject the rest of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    /// Parses the value as a finite number. Text is trimmed and a lone decimal
    /// comma is accepted (`"12,5"`).
    pub fn as_f64(&self) -> Option<f64> {
        let parsed = match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => {
                let trimmed = s.trim();
                trimmed.parse::<f64>().ok().or_else(|| {
                    if trimmed.contains('.') {
                        None
                    } else {
                        trimmed.replacen(',', ".", 1).parse::<f64>().ok()
                    }
                })
            }
            RawValue::Other(_) => None,
        };
        parsed.filter(|n| n.is_finite())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => write!(f, "{}", s),
            RawValue::Other(_) => Ok(()),
        }
    }
}

/// Coerces an optional upstream value to a number. Absent, empty and unparseable
/// values become `0.0`.
pub fn to_number(value: Option<&RawValue>) -> f64 {
    value.and_then(RawValue::as_f64).unwrap_or(0.0)
}

/// Coerces an optional upstream value to text; absent values and values of other
/// JSON types become `""`.
pub fn to_text(value: Option<&RawValue>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Record from an automatic (sensor) station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomaticRecord {
    #[serde(rename = "DC_NOME")]
    pub name: Option<RawValue>,
    #[serde(rename = "UF")]
    pub state: Option<RawValue>,
    #[serde(rename = "CD_ESTACAO")]
    pub station_code: Option<RawValue>,
    #[serde(rename = "DT_MEDICAO")]
    pub date: Option<RawValue>,
    #[serde(rename = "HR_MEDICAO")]
    pub hour: Option<RawValue>,
    #[serde(rename = "VL_LATITUDE")]
    pub latitude: Option<RawValue>,
    #[serde(rename = "VL_LONGITUDE")]
    pub longitude: Option<RawValue>,

    #[serde(rename = "PRE_INS")]
    pub pressure_inst: Option<RawValue>,
    #[serde(rename = "PRE_MAX")]
    pub pressure_max: Option<RawValue>,
    #[serde(rename = "PRE_MIN")]
    pub pressure_min: Option<RawValue>,

    #[serde(rename = "PTO_INS")]
    pub dew_point_inst: Option<RawValue>,
    #[serde(rename = "PTO_MAX")]
    pub dew_point_max: Option<RawValue>,
    #[serde(rename = "PTO_MIN")]
    pub dew_point_min: Option<RawValue>,

    #[serde(rename = "TEM_INS")]
    pub temperature_inst: Option<RawValue>,
    #[serde(rename = "TEM_MAX")]
    pub temperature_max: Option<RawValue>,
    #[serde(rename = "TEM_MIN")]
    pub temperature_min: Option<RawValue>,
    #[serde(rename = "TEM_MED")]
    pub temperature_mean: Option<RawValue>,
    #[serde(rename = "TEM_SEN")]
    pub temperature_feels_like: Option<RawValue>,

    #[serde(rename = "UMD_INS")]
    pub humidity_inst: Option<RawValue>,
    #[serde(rename = "UMD_MAX")]
    pub humidity_max: Option<RawValue>,
    #[serde(rename = "UMD_MIN")]
    pub humidity_min: Option<RawValue>,

    #[serde(rename = "CHUVA")]
    pub rain: Option<RawValue>,
    #[serde(rename = "RAD_GLO")]
    pub radiation: Option<RawValue>,
    #[serde(rename = "VEN_VEL")]
    pub wind_speed: Option<RawValue>,
    #[serde(rename = "VEN_DIR")]
    pub wind_direction: Option<RawValue>,
    #[serde(rename = "VEN_RAJ")]
    pub wind_gust: Option<RawValue>,

    // Station health, not displayed.
    #[serde(rename = "TEN_BAT")]
    pub battery_voltage: Option<RawValue>,
    #[serde(rename = "TEM_CPU")]
    pub cpu_temperature: Option<RawValue>,
}

/// Record from a manual (conventional) station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualRecord {
    #[serde(rename = "DC_NOME")]
    pub name: Option<RawValue>,
    #[serde(rename = "UF")]
    pub state: Option<RawValue>,
    #[serde(rename = "DT_MEDICAO")]
    pub date: Option<RawValue>,
    #[serde(rename = "VL_LATITUDE")]
    pub latitude: Option<RawValue>,
    #[serde(rename = "VL_LONGITUDE")]
    pub longitude: Option<RawValue>,
    #[serde(rename = "CHUVA")]
    pub rain: Option<RawValue>,
    #[serde(rename = "TEMP_HORA")]
    pub temperature_hour: Option<RawValue>,
    #[serde(rename = "TEMP_MAX")]
    pub temperature_max: Option<RawValue>,
    #[serde(rename = "TEMP_MED")]
    pub temperature_mean: Option<RawValue>,
    #[serde(rename = "TEMP_MIN")]
    pub temperature_min: Option<RawValue>,
    #[serde(rename = "UMID_HORA")]
    pub humidity_hour: Option<RawValue>,
    #[serde(rename = "UMID_MED")]
    pub humidity_mean: Option<RawValue>,
    #[serde(rename = "VENT_DIR")]
    pub wind_direction: Option<RawValue>,
    #[serde(rename = "VENT_VEL")]
    pub wind_speed: Option<RawValue>,
    #[serde(rename = "PRESS_EST")]
    pub pressure: Option<RawValue>,
    #[serde(rename = "INSO_HORA")]
    pub insolation: Option<RawValue>,
    #[serde(rename = "NEBU_HORA")]
    pub cloudiness: Option<RawValue>,
}

/// A raw record of either station family.
#[derive(Debug, Clone, PartialEq)]
pub enum RawStationRecord {
    Automatic(AutomaticRecord),
    Manual(ManualRecord),
}

impl RawStationRecord {
    /// Reads a JSON record using the schema of `station_type`.
    ///
    /// Any JSON object is accepted since all fields are optional and absorb any
    /// JSON type; only values that are not objects fail.
    pub fn from_json(
        value: serde_json::Value,
        station_type: StationType,
    ) -> Result<Self, serde_json::Error> {
        Ok(match station_type {
            StationType::Automatic => RawStationRecord::Automatic(serde_json::from_value(value)?),
            StationType::Manual => RawStationRecord::Manual(serde_json::from_value(value)?),
        })
    }

    /// An all-absent record of the given type.
    pub fn empty(station_type: StationType) -> Self {
        match station_type {
            StationType::Automatic => RawStationRecord::Automatic(AutomaticRecord::default()),
            StationType::Manual => RawStationRecord::Manual(ManualRecord::default()),
        }
    }

    pub fn station_type(&self) -> StationType {
        match self {
            RawStationRecord::Automatic(_) => StationType::Automatic,
            RawStationRecord::Manual(_) => StationType::Manual,
        }
    }
}
