//! This module provides the main entry point of the crate: the [`Inmet`] client,
//! which lists stations and loads a station's history as a [`WeatherDataset`].

use crate::api::client::ApiClient;
use crate::dataset::WeatherDataset;
use crate::error::InmetError;
use crate::transform::normalize::normalize_json;
use crate::types::filters::WeatherFilters;
use crate::types::frequency::StationType;
use crate::types::row::check_uniform_shape;
use crate::types::station::StationInfo;
use crate::utils::{resolve_base_url, DEFAULT_TIMEOUT};
use bon::bon;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// The main client for the station-history API.
///
/// Holds the HTTP client and a load generation counter. Starting a
/// [`load`](Inmet::load) supersedes any load still in flight on the same client:
/// when the older one's response arrives it is discarded and the older call
/// returns [`InmetError::Superseded`]. Datasets already returned are unaffected.
///
/// # Examples
///
/// ```no_run
/// # use inmet::{Inmet, InmetError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), InmetError> {
/// let client = Inmet::new()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Inmet {
    client: ApiClient,
    generation: AtomicU64,
}

#[bon]
impl Inmet {
    /// Creates a client with the default settings.
    ///
    /// The base URL is read from the `INMET_API_URL` environment variable, falling
    /// back to `http://localhost:8000/api/`. Requests time out after 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`InmetError::Api`] if the base URL is invalid or the HTTP client
    /// cannot be created.
    pub fn new() -> Result<Self, InmetError> {
        Self::with_options().call()
    }

    /// Creates a client with explicit settings.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.base_url(impl Into<String>)`: Optional. API root, e.g.
    ///   `"https://example.org/api/"`. Defaults to `INMET_API_URL` or
    ///   `http://localhost:8000/api/`.
    /// * `.timeout(Duration)`: Optional. Per-request timeout. Defaults to 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`InmetError::Api`] if the base URL is invalid or the HTTP client
    /// cannot be created.
    ///
    /// # Examples
    ///
    /// ```
    /// # use inmet::{Inmet, InmetError};
    /// # use std::time::Duration;
    /// # fn main() -> Result<(), InmetError> {
    /// let client = Inmet::with_options()
    ///     .base_url("http://127.0.0.1:8000/api")
    ///     .timeout(Duration::from_secs(10))
    ///     .call()?;
    /// assert_eq!(client.base_url(), "http://127.0.0.1:8000/api/");
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn with_options(
        #[builder(into)] base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, InmetError> {
        let base_url = base_url.unwrap_or_else(resolve_base_url);
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ApiClient::new(&base_url, timeout)?;
        debug!("Using API at {} (timeout {:?})", client.base_url(), timeout);
        Ok(Self {
            client,
            generation: AtomicU64::new(0),
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url().as_str()
    }

    /// Lists the stations of one family.
    ///
    /// # Errors
    ///
    /// Returns [`InmetError::Api`] on network, HTTP status or decoding failures.
    pub async fn stations(&self, station_type: StationType) -> Result<Vec<StationInfo>, InmetError> {
        Ok(self.client.fetch_stations(station_type).await?)
    }

    /// Loads the history of one station as a [`WeatherDataset`].
    ///
    /// The filters are validated first; nothing is requested for invalid filters.
    /// Records are normalized with the schema of `filters.station_type`.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.filters(&WeatherFilters)`: **Required.** Station, date range and frequency.
    ///
    /// # Errors
    ///
    /// * [`InmetError::InvalidFilters`] if [`WeatherFilters::validate`] fails.
    /// * [`InmetError::Api`] on network, HTTP status or decoding failures.
    /// * [`InmetError::Superseded`] if another load was started on this client
    ///   before this one's response arrived.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use inmet::{Frequency, Inmet, InmetError, StationType, WeatherFilters};
    /// # use chrono::NaiveDate;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), InmetError> {
    /// let client = Inmet::new()?;
    /// let filters = WeatherFilters::new(
    ///     StationType::Automatic,
    ///     "A001",
    ///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    ///     Frequency::Daily,
    /// );
    /// let dataset = client.load().filters(&filters).call().await?;
    /// println!("{} rows, columns {:?}", dataset.len(), dataset.columns);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn load(&self, filters: &WeatherFilters) -> Result<WeatherDataset, InmetError> {
        filters.validate()?;
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let records = self.client.fetch_interval(&filters.interval_request()).await?;

        if self.generation.load(Ordering::SeqCst) != ticket {
            info!(
                "Discarding {} records for station {}: a newer load was started",
                records.len(),
                filters.station
            );
            return Err(InmetError::Superseded {
                station: filters.station.clone(),
            });
        }

        let rows: Vec<_> = records
            .into_iter()
            .map(|record| normalize_json(record, filters.station_type))
            .collect();

        if cfg!(debug_assertions) {
            if let Some(index) = check_uniform_shape(&rows) {
                warn!(
                    "Row {} of station {} has a different shape than row 0; header config may not address it",
                    index, filters.station
                );
            }
        }

        Ok(WeatherDataset::new(filters.clone(), rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::test_server::{serve, serve_once, Reply};
    use crate::api::error::ApiError;
    use crate::types::filters::FilterError;
    use crate::types::frequency::Frequency;
    use chrono::NaiveDate;

    fn filters(station: &str, station_type: StationType) -> WeatherFilters {
        WeatherFilters::new(
            station_type,
            station,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            Frequency::Daily,
        )
    }

    fn client(base: &str) -> Inmet {
        Inmet::with_options()
            .base_url(base)
            .timeout(Duration::from_secs(5))
            .call()
            .unwrap()
    }

    #[tokio::test]
    async fn test_load_normalizes_with_requested_type() {
        let (base, _server) = serve_once(
            "200 OK",
            r#"{"data":[
                {"DC_NOME":"BRASILIA","DT_MEDICAO":"2024-03-01","TEMP_MED":"22.0","CHUVA":"3.5"},
                {"DC_NOME":"BRASILIA","DT_MEDICAO":"2024-03-02","TEMP_MED":"24.0","CHUVA":"0"}
            ]}"#,
        )
        .await;
        let inmet = client(&base);

        let dataset = inmet
            .load()
            .filters(&filters("83377", StationType::Manual))
            .call()
            .await
            .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.header_config.len(), 12);
        assert_eq!(dataset.columns.first().map(String::as_str), Some("Nome"));
        assert_eq!(dataset.kpis().temp_avg, Some(23.0));
        assert_eq!(dataset.stats().rain_total, 3.5);
    }

    #[tokio::test]
    async fn test_empty_response_yields_empty_dataset() {
        let (base, _server) = serve_once("200 OK", r#"{"data":[]}"#).await;
        let dataset = client(&base)
            .load()
            .filters(&filters("A001", StationType::Automatic))
            .call()
            .await
            .unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.header_config.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_filters_are_rejected_before_request() {
        // Nothing listens on this address; an attempted request would be a network error.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let inmet = client(&format!("http://{addr}/api/"));

        let err = inmet
            .load()
            .filters(&filters("  ", StationType::Automatic))
            .call()
            .await
            .unwrap_err();
        assert!(matches!(err, InmetError::InvalidFilters(FilterError::MissingStation)));
    }

    #[tokio::test]
    async fn test_api_errors_are_wrapped() {
        let (base, _server) = serve_once("404 Not Found", "{}").await;
        let err = client(&base)
            .stations(StationType::Automatic)
            .await
            .unwrap_err();
        assert!(matches!(err, InmetError::Api(ApiError::HttpStatus { .. })), "{err:?}");
    }

    #[tokio::test]
    async fn test_newer_load_supersedes_older() {
        let (base, _server) = serve(2, |request| {
            if request.contains("\"SLOW\"") {
                Reply {
                    delay: Duration::from_millis(400),
                    ..Reply::ok(r#"{"data":[{"DC_NOME":"OLD"}]}"#)
                }
            } else {
                Reply::ok(r#"{"data":[{"DC_NOME":"NEW"}]}"#)
            }
        })
        .await;
        let inmet = client(&base);
        let slow_filters = filters("SLOW", StationType::Automatic);
        let fast_filters = filters("FAST", StationType::Automatic);

        let slow = inmet.load().filters(&slow_filters).call();
        let fast = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            inmet.load().filters(&fast_filters).call().await
        };
        let (slow, fast) = tokio::join!(slow, fast);

        match slow {
            Err(InmetError::Superseded { station }) => assert_eq!(station, "SLOW"),
            other => panic!("expected Superseded, got {other:?}"),
        }
        let fast = fast.unwrap();
        assert_eq!(fast.rows[0].text("Nome"), Some("NEW"));
    }

    #[tokio::test]
    async fn test_sequential_loads_are_independent() {
        let (base, _server) = serve(2, |_| Reply::ok(r#"{"data":[{"DC_NOME":"X"}]}"#)).await;
        let inmet = client(&base);
        let f = filters("A001", StationType::Automatic);

        let first = inmet.load().filters(&f).call().await.unwrap();
        let second = inmet.load().filters(&f).call().await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_base_url() {
        let err = Inmet::with_options().base_url("not a url").call().unwrap_err();
        assert!(matches!(err, InmetError::Api(ApiError::InvalidUrl { .. })));
    }
}
