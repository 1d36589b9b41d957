//! Query filters chosen by the user and the request body derived from them.

use crate::types::frequency::{Frequency, StationType};
use crate::types::station::ALL_STATES;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("No station selected")]
    MissingStation,

    #[error("End date {end} is before start date {start}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// The filter set behind one "generate table" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherFilters {
    pub station_type: StationType,
    /// UF code, or `"ALL"`.
    pub state: String,
    /// Station code (`CD_ESTACAO`).
    pub station: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub frequency: Frequency,
}

impl WeatherFilters {
    /// Filters for a station across all states.
    pub fn new(
        station_type: StationType,
        station: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        frequency: Frequency,
    ) -> Self {
        Self {
            station_type,
            state: ALL_STATES.to_string(),
            station: station.into(),
            start,
            end,
            frequency,
        }
    }

    /// Checks the filters before any request is made.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MissingStation`] for an empty station code and
    /// [`FilterError::InvertedRange`] when `end` precedes `start`.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.station.trim().is_empty() {
            return Err(FilterError::MissingStation);
        }
        if self.end < self.start {
            return Err(FilterError::InvertedRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Body for `POST interval/`.
    pub fn interval_request(&self) -> IntervalRequest {
        IntervalRequest {
            start: self.start.format("%Y-%m-%d").to_string(),
            end: self.end.format("%Y-%m-%d").to_string(),
            station: self.station.clone(),
            frequency: self.frequency,
        }
    }

    /// Export file name, `INMET_{station}_{YYYYMMDD}_{YYYYMMDD}.{extension}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use inmet::{Frequency, StationType, WeatherFilters};
    ///
    /// let filters = WeatherFilters::new(
    ///     StationType::Automatic,
    ///     "A001",
    ///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    ///     Frequency::Daily,
    /// );
    /// assert_eq!(filters.export_file_name("csv"), "INMET_A001_20240101_20240131.csv");
    /// ```
    pub fn export_file_name(&self, extension: &str) -> String {
        format!(
            "INMET_{}_{}_{}.{}",
            self.station,
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d"),
            extension
        )
    }

    /// Report file name, `INMET_{station}_relatorio.{extension}`.
    pub fn report_file_name(&self, extension: &str) -> String {
        format!("INMET_{}_relatorio.{}", self.station, extension)
    }
}

/// JSON body of the interval endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalRequest {
    #[serde(rename = "dataInicio")]
    pub start: String,
    #[serde(rename = "dataFinal")]
    pub end: String,
    #[serde(rename = "codigoEstacao")]
    pub station: String,
    #[serde(rename = "frequencia")]
    pub frequency: Frequency,
}
