use crate::api::error::ApiError;
use crate::types::filters::IntervalRequest;
use crate::types::frequency::StationType;
use crate::types::station::StationInfo;
use log::{info, warn};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const INTERVAL_PATH: &str = "interval/";

#[derive(Debug, Deserialize)]
struct IntervalResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

/// HTTP client for the station-history API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for `base_url` with a per-request `timeout`.
    ///
    /// A trailing `/` is added to the base URL when missing, so that endpoint
    /// paths are resolved beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `base_url` is not an absolute URL, or
    /// [`ApiError::ClientBuild`] if the HTTP client cannot be initialised.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }

    /// Fetches the raw records of one station over a date range.
    ///
    /// Sends `POST interval/` with `request` as JSON and returns the `data` array
    /// of the response. A response without `data` yields an empty list.
    pub async fn fetch_interval(&self, request: &IntervalRequest) -> Result<Vec<Value>, ApiError> {
        let url = self.endpoint(INTERVAL_PATH)?;
        info!(
            "Requesting {} data for station {} from {} to {}",
            request.frequency, request.station, request.start, request.end
        );

        let response = self
            .http
            .post(url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::NetworkRequest(url.to_string(), e))?;

        let body: IntervalResponse = read_json(url.as_str(), response).await?;
        let records = body.data.unwrap_or_default();
        info!(
            "Received {} records for station {}",
            records.len(),
            request.station
        );
        Ok(records)
    }

    /// Lists the stations of one family (`GET automaticas/` or `GET manuais/`).
    pub async fn fetch_stations(
        &self,
        station_type: StationType,
    ) -> Result<Vec<StationInfo>, ApiError> {
        let url = self.endpoint(&format!("{}/", station_type.path_segment()))?;
        info!("Downloading {} station list from {}", station_type, url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ApiError::NetworkRequest(url.to_string(), e))?;

        let stations: Vec<StationInfo> = read_json(url.as_str(), response).await?;
        info!("Loaded {} {} stations", stations.len(), station_type);
        Ok(stations)
    }
}

/// Parses an absolute base URL, appending a trailing `/` if missing.
pub fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    let url = Url::parse(&with_slash).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl {
            url: raw.to_string(),
            reason: "not a base URL".to_string(),
        });
    }
    Ok(url)
}

async fn read_json<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ApiError> {
    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e);
            return Err(if let Some(status) = e.status() {
                ApiError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                }
            } else {
                ApiError::NetworkRequest(url.to_string(), e)
            });
        }
    };

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::NetworkRequest(url.to_string(), e))?;
    serde_json::from_slice(&bytes).map_err(|source| ApiError::JsonParse {
        url: url.to_string(),
        source,
    })
}
