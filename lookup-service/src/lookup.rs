use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, InvalidHeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT},
    Client, StatusCode,
};
use shared::data::{VehicleRecord, FIELDS};
use thiserror::Error;

use crate::{
    config::LookupConfig,
    extract::{extract_record, Extraction},
};

/// The only failure message callers ever see, whatever went wrong.
pub const LOOKUP_FAILED: &str = "Vehicle Not Found or Website Down";

/// Why a lookup failed. Only used for logging; every variant is reported as [`LOOKUP_FAILED`].
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Request to the source failed: {0}")]
    Request(reqwest::Error),
    #[error("The source did not answer within {0:?}")]
    Timeout(Duration),
    #[error("The source answered with {0}")]
    Status(StatusCode),
    #[error("Could not read the page sent by the source: {0}")]
    Body(reqwest::Error),
    #[error("None of the expected labels were found on the page")]
    NoFields,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Configured header is not a valid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
    #[error("Could not build the HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Trims and upper-cases a registration number.
pub fn normalize_registration(registration: &str) -> String {
    registration.trim().to_uppercase()
}

/// Provides the HTML page describing a vehicle.
#[rocket::async_trait]
pub trait VehicleSource: Send + Sync {
    /// `registration` is already normalized.
    async fn fetch_page(&self, registration: &str) -> Result<String, LookupError>;
}

/// Fetches pages from the configured upstream site.
pub struct HttpSource {
    client: Client,
    config: LookupConfig,
}

impl HttpSource {
    pub fn new(config: &LookupConfig) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&config.accept_language)?);
        headers.insert(REFERER, HeaderValue::from_str(&config.referer)?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn convert(&self, error: reqwest::Error, body: bool) -> LookupError {
        if error.is_timeout() {
            LookupError::Timeout(self.config.timeout())
        } else if body {
            LookupError::Body(error)
        } else {
            LookupError::Request(error)
        }
    }
}

#[rocket::async_trait]
impl VehicleSource for HttpSource {
    async fn fetch_page(&self, registration: &str) -> Result<String, LookupError> {
        let url = self.config.upstream_url_for(registration);
        debug!("Fetching {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.convert(e, false))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        response.text().await.map_err(|e| self.convert(e, true))
    }
}

pub struct Lookup {
    source: Box<dyn VehicleSource>,
}

impl Lookup {
    pub fn new(source: impl VehicleSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Looks up a vehicle by its registration number.
    ///
    /// # Errors
    ///
    /// Fails if the page could not be fetched or carries none of the expected labels.
    /// Individual fields missing from the page are not errors; they hold the sentinel.
    pub async fn lookup(&self, registration: &str) -> Result<VehicleRecord, LookupError> {
        let registration = normalize_registration(registration);
        let page = self.source.fetch_page(&registration).await?;

        let Extraction {
            record,
            labels_found,
        } = extract_record(&page);
        if labels_found == 0 {
            return Err(LookupError::NoFields);
        }

        info!(
            "Found {} of {} fields for {registration}.",
            record.available_count(),
            FIELDS.len()
        );
        Ok(record)
    }
}
