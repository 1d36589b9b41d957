//! Converts raw automatic/manual station records into [`NormalizedRow`]s.
//!
//! Each station family has one fixed mapping table. The mapping is total: every
//! output category is always present, absent numeric inputs become `0` and absent
//! text inputs become `""`.

use crate::types::frequency::StationType;
use crate::types::raw_record::{
    to_number, to_text, AutomaticRecord, ManualRecord, RawStationRecord, RawValue,
};
use crate::types::row::{CategoryValue, NormalizedRow, ScalarValue};
use log::warn;

pub const NAME: &str = "Nome";
pub const STATE: &str = "UF";
pub const HOUR: &str = "Hora Medição";
pub const DATE: &str = "Data Medição";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const PRESSURE: &str = "Pressão";
pub const DEW_POINT: &str = "Ponto de Orvalho";
pub const TEMPERATURE: &str = "Temperatura";
pub const HUMIDITY: &str = "Umidade";
pub const RAIN: &str = "Chuva";
pub const RADIATION: &str = "Radiação";
pub const WIND: &str = "Vento";
pub const INSOLATION: &str = "Insolação";
pub const CLOUDINESS: &str = "Nebulosidade";

fn num(value: &Option<RawValue>) -> ScalarValue {
    ScalarValue::Number(to_number(value.as_ref()))
}

fn text(value: &Option<RawValue>) -> ScalarValue {
    ScalarValue::Text(to_text(value.as_ref()))
}

fn triplet(inst: &Option<RawValue>, max: &Option<RawValue>, min: &Option<RawValue>) -> CategoryValue {
    CategoryValue::group([("Inst.", num(inst)), ("Max.", num(max)), ("Min.", num(min))])
}

/// Normalizes a raw record.
///
/// `station_type` is the type the caller requested. The API does not tag its
/// records, so when the record was read with the other schema the row is built
/// from the requested schema instead, with every field treated as absent except
/// those the two schemas share.
pub fn normalize(record: &RawStationRecord, station_type: StationType) -> NormalizedRow {
    match (record, station_type) {
        (RawStationRecord::Automatic(r), StationType::Automatic) => normalize_automatic(r),
        (RawStationRecord::Manual(r), StationType::Manual) => normalize_manual(r),
        (RawStationRecord::Automatic(r), StationType::Manual) => {
            warn!("Automatic record normalized as manual; only shared fields are kept");
            normalize_manual(&ManualRecord {
                name: r.name.clone(),
                state: r.state.clone(),
                date: r.date.clone(),
                latitude: r.latitude.clone(),
                longitude: r.longitude.clone(),
                rain: r.rain.clone(),
                ..ManualRecord::default()
            })
        }
        (RawStationRecord::Manual(r), StationType::Automatic) => {
            warn!("Manual record normalized as automatic; only shared fields are kept");
            normalize_automatic(&AutomaticRecord {
                name: r.name.clone(),
                state: r.state.clone(),
                date: r.date.clone(),
                latitude: r.latitude.clone(),
                longitude: r.longitude.clone(),
                rain: r.rain.clone(),
                ..AutomaticRecord::default()
            })
        }
    }
}

/// Reads a JSON record with the schema of `station_type` and normalizes it.
/// Values that are not JSON objects yield an all-default row.
pub fn normalize_json(value: serde_json::Value, station_type: StationType) -> NormalizedRow {
    let record = RawStationRecord::from_json(value, station_type).unwrap_or_else(|e| {
        warn!("Unreadable {} record, using defaults: {}", station_type, e);
        RawStationRecord::empty(station_type)
    });
    normalize(&record, station_type)
}

fn normalize_automatic(r: &AutomaticRecord) -> NormalizedRow {
    NormalizedRow::new()
        .with(NAME, text(&r.name))
        .with(STATE, text(&r.state))
        .with(HOUR, CategoryValue::group([("UTC", text(&r.hour))]))
        .with(DATE, text(&r.date))
        .with(LATITUDE, num(&r.latitude))
        .with(LONGITUDE, num(&r.longitude))
        .with(PRESSURE, triplet(&r.pressure_inst, &r.pressure_max, &r.pressure_min))
        .with(
            DEW_POINT,
            triplet(&r.dew_point_inst, &r.dew_point_max, &r.dew_point_min),
        )
        .with(
            TEMPERATURE,
            CategoryValue::group([
                ("Max.", num(&r.temperature_max)),
                ("Min.", num(&r.temperature_min)),
                ("Inst.", num(&r.temperature_inst)),
            ]),
        )
        .with(
            HUMIDITY,
            CategoryValue::group([
                ("Max.", num(&r.humidity_max)),
                ("Min.", num(&r.humidity_min)),
                ("Inst.", num(&r.humidity_inst)),
            ]),
        )
        .with(RAIN, CategoryValue::group([("(mm)", num(&r.rain))]))
        .with(RADIATION, CategoryValue::group([("Kj/m²", num(&r.radiation))]))
        .with(
            WIND,
            CategoryValue::group([
                ("Vel. (m/s)", num(&r.wind_speed)),
                ("Dir.", num(&r.wind_direction)),
                ("Raj. (m/s)", num(&r.wind_gust)),
            ]),
        )
}

fn normalize_manual(r: &ManualRecord) -> NormalizedRow {
    NormalizedRow::new()
        .with(NAME, text(&r.name))
        .with(STATE, text(&r.state))
        .with(DATE, text(&r.date))
        .with(LATITUDE, num(&r.latitude))
        .with(LONGITUDE, num(&r.longitude))
        .with(RAIN, CategoryValue::group([("(mm)", num(&r.rain))]))
        .with(
            TEMPERATURE,
            CategoryValue::group([
                ("Hora", text(&r.temperature_hour)),
                ("Max.", num(&r.temperature_max)),
                ("Med.", num(&r.temperature_mean)),
                ("Min.", num(&r.temperature_min)),
            ]),
        )
        .with(
            HUMIDITY,
            CategoryValue::group([
                ("Hora", text(&r.humidity_hour)),
                ("Med.", num(&r.humidity_mean)),
            ]),
        )
        // Manual stations report direction as a compass label, kept as text.
        .with(
            WIND,
            CategoryValue::group([
                ("Dir.", text(&r.wind_direction)),
                ("Vel.", num(&r.wind_speed)),
            ]),
        )
        .with(PRESSURE, CategoryValue::group([("hPa", num(&r.pressure))]))
        .with(INSOLATION, CategoryValue::group([("h", text(&r.insolation))]))
        .with(CLOUDINESS, CategoryValue::group([("Décimos", text(&r.cloudiness))]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_automatic() -> serde_json::Value {
        json!({
            "DC_NOME": "BRASILIA", "UF": "DF", "DT_MEDICAO": "2024-03-01", "HR_MEDICAO": "1200",
            "VL_LATITUDE": "-15.78", "VL_LONGITUDE": "-47.92", "CD_ESTACAO": "A001",
            "PRE_INS": "886.1", "PRE_MAX": "886.3", "PRE_MIN": "885.9",
            "PTO_INS": "15.2", "PTO_MAX": "15.9", "PTO_MIN": "14.8",
            "TEM_INS": "24.1", "TEM_MAX": "24.6", "TEM_MIN": "23.0",
            "UMD_INS": "57", "UMD_MAX": "62", "UMD_MIN": "55",
            "CHUVA": "0.2", "RAD_GLO": "2350.4", "VEN_VEL": "2.1", "VEN_DIR": "90", "VEN_RAJ": "5.3"
        })
    }

    #[test]
    fn test_automatic_mapping() {
        let row = normalize_json(full_automatic(), StationType::Automatic);
        assert_eq!(
            row.categories().collect::<Vec<_>>(),
            [
                NAME, STATE, HOUR, DATE, LATITUDE, LONGITUDE, PRESSURE, DEW_POINT, TEMPERATURE,
                HUMIDITY, RAIN, RADIATION, WIND
            ]
        );
        assert_eq!(row.text(NAME), Some("BRASILIA"));
        assert_eq!(row.cell(HOUR, "UTC"), Some(&ScalarValue::from("1200")));
        assert_eq!(row.cell(LATITUDE, ""), Some(&ScalarValue::Number(-15.78)));
        assert_eq!(row.cell(TEMPERATURE, "Max."), Some(&ScalarValue::Number(24.6)));
        assert_eq!(
            row.get(TEMPERATURE).unwrap().sub_labels(),
            ["Max.", "Min.", "Inst."]
        );
        assert_eq!(row.cell(WIND, "Raj. (m/s)"), Some(&ScalarValue::Number(5.3)));
        assert_eq!(row.cell(RADIATION, "Kj/m²"), Some(&ScalarValue::Number(2350.4)));
    }

    #[test]
    fn test_automatic_shape_is_closed_over_missing_fields() {
        let full = normalize_json(full_automatic(), StationType::Automatic);
        let sparse = normalize_json(
            json!({"DC_NOME": "BRASILIA", "TEM_INS": "", "CHUVA": "abc"}),
            StationType::Automatic,
        );
        let empty = normalize_json(json!({}), StationType::Automatic);

        assert_eq!(full.shape(), sparse.shape());
        assert_eq!(full.shape(), empty.shape());
        assert_eq!(sparse.cell(TEMPERATURE, "Inst."), Some(&ScalarValue::Number(0.0)));
        assert_eq!(sparse.cell(RAIN, "(mm)"), Some(&ScalarValue::Number(0.0)));
        assert_eq!(empty.text(DATE), Some(""));
    }

    #[test]
    fn test_manual_mapping() {
        let row = normalize_json(
            json!({
                "DC_NOME": "BRASILIA", "UF": "DF", "DT_MEDICAO": "2024-03-01",
                "VL_LATITUDE": -15.79, "VL_LONGITUDE": "-47.93",
                "CHUVA": 12.4, "TEMP_HORA": "1200", "TEMP_MAX": "29.4", "TEMP_MED": 22.1,
                "TEMP_MIN": "17.0", "UMID_HORA": "1200", "UMID_MED": "71",
                "VENT_DIR": "NE", "VENT_VEL": "1.5", "PRESS_EST": "887.2",
                "INSO_HORA": "6.1", "NEBU_HORA": "7"
            }),
            StationType::Manual,
        );
        assert_eq!(
            row.categories().collect::<Vec<_>>(),
            [
                NAME, STATE, DATE, LATITUDE, LONGITUDE, RAIN, TEMPERATURE, HUMIDITY, WIND,
                PRESSURE, INSOLATION, CLOUDINESS
            ]
        );
        assert_eq!(row.cell(TEMPERATURE, "Med."), Some(&ScalarValue::Number(22.1)));
        assert_eq!(row.cell(WIND, "Dir."), Some(&ScalarValue::from("NE")));
        assert_eq!(row.cell(PRESSURE, "hPa"), Some(&ScalarValue::Number(887.2)));
        assert_eq!(row.cell(CLOUDINESS, "Décimos"), Some(&ScalarValue::from("7")));
        assert_eq!(row.get(HOUR), None);

        let empty = normalize_json(json!({}), StationType::Manual);
        assert_eq!(row.shape(), empty.shape());
    }

    #[test]
    fn test_mismatched_variant_follows_requested_type() {
        let record =
            RawStationRecord::from_json(full_automatic(), StationType::Automatic).unwrap();
        let as_manual = normalize(&record, StationType::Manual);
        let manual_shape = normalize_json(json!({}), StationType::Manual).shape();
        assert_eq!(as_manual.shape(), manual_shape);
        assert_eq!(as_manual.text(NAME), Some("BRASILIA"));
        assert_eq!(as_manual.cell(RAIN, "(mm)"), Some(&ScalarValue::Number(0.2)));
    }

    #[test]
    fn test_bad_field_type_keeps_rest_of_record() {
        let row = normalize_json(
            json!({"DC_NOME": "BRASILIA", "DT_MEDICAO": "2024-01-01", "TEM_INS": "22.5",
                   "CHUVA": true}),
            StationType::Automatic,
        );
        assert_eq!(row.text(NAME), Some("BRASILIA"));
        assert_eq!(row.text(DATE), Some("2024-01-01"));
        assert_eq!(
            row.get(TEMPERATURE).and_then(|t| t.sub_value("Inst.")),
            Some(&ScalarValue::Number(22.5))
        );
        assert_eq!(
            row.get(RAIN).and_then(|r| r.sub_value("(mm)")),
            Some(&ScalarValue::Number(0.0))
        );
    }

    #[test]
    fn test_non_object_record_yields_default_row() {
        let row = normalize_json(json!("garbage"), StationType::Automatic);
        assert_eq!(row.len(), 13);
        assert_eq!(row.cell(PRESSURE, "Inst."), Some(&ScalarValue::Number(0.0)));
    }
}
