use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum Error {
    #[error("'{0}' is not a valid base URL: {1}")]
    InvalidBaseUrl(String, url::ParseError),
    #[error("An error occured when interacting with the server: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Both a registration number and an access key are required.")]
    MissingInput,
    #[error("The server answered {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Talks to a running lookup service.
pub struct LookupClient {
    base_url: Url,
    client: Client,
}

impl LookupClient {
    /// # Errors
    ///
    /// Fails if `base_url` is not an absolute URL or the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let mut parsed =
            Url::parse(base_url).map_err(|e| Error::InvalidBaseUrl(base_url.to_string(), e))?;
        // Without the trailing slash joining would replace the last path segment.
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            base_url: parsed,
            client,
        })
    }

    /// The URL a lookup for `registration` is sent to.
    ///
    /// # Errors
    ///
    /// Fails if either value is empty.
    pub fn endpoint(&self, registration: &str, key: &str) -> Result<Url, Error> {
        let registration = registration.trim();
        let key = key.trim();
        if registration.is_empty() || key.is_empty() {
            return Err(Error::MissingInput);
        }

        let mut url = self
            .base_url
            .join("lookup")
            .map_err(|e| Error::InvalidBaseUrl(self.base_url.to_string(), e))?;
        url.query_pairs_mut()
            .append_pair("rc", &registration.to_uppercase())
            .append_pair("key", key);
        Ok(url)
    }

    /// Sends a lookup and returns the JSON the service answered with.
    ///
    /// # Errors
    ///
    /// Fails on missing input, transport errors, or when the service does not answer with success.
    pub fn lookup(&self, registration: &str, key: &str) -> Result<Value, Error> {
        let url = self.endpoint(registration, key)?;
        info!("Requesting {url}");

        let response = self.client.get(url).send()?;
        let status = response.status();
        debug!("Server answered {status}");

        if status.is_success() {
            return Ok(response.json()?);
        }

        // Proxies in front of the service may answer with something other than JSON.
        let message = response
            .json::<Value>()
            .ok()
            .and_then(|body| {
                body.get("message")
                    .or_else(|| body.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Request Failed".to_string());
        Err(Error::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
