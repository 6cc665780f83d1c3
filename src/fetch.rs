use crate::error::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tracing::{error, info};

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Source of the raw feed.
pub trait Fetch {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpFetcher {
    client: Client,
    params: Vec<(String, String)>,
}

impl HttpFetcher {
    pub fn new(
        timeout: Duration,
        headers: &[(String, String)],
        params: &[(String, String)],
    ) -> Result<Self> {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            let header = format!("{}: {}", name, value);
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::InvalidHeader(header.clone()))?;
            let value = HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader(header))?;
            header_map.insert(name, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(header_map)
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            params: params.to_vec(),
        })
    }
}

impl Fetch for HttpFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        info!("Downloading feed from {}", url);

        let response = self
            .client
            .get(url)
            .query(&self.params)
            .send()
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let err = Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            };
            error!("{}", err);
            return Err(err);
        }

        let bytes = response.bytes().map_err(|e| request_error(url, e))?;
        info!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

fn request_error(url: &str, e: reqwest::Error) -> Error {
    let err = if e.is_timeout() {
        Error::Timeout {
            url: url.to_string(),
        }
    } else {
        Error::Connection {
            url: url.to_string(),
            details: e.to_string(),
        }
    };
    error!("{}", err);
    err
}
