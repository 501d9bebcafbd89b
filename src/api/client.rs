use reqwest::Client as HttpClient;
use reqwest::multipart::{Form, Part};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::TransactionApi;
use crate::models::{ApiResponse, Transaction};

/// HTTP client for the transaction backend.
///
/// Wraps the three endpoints behind [`TransactionApi`] and collapses every
/// transport-level failure (unreachable host, non-envelope body, malformed
/// JSON) into a `RUNTIME_ERROR` envelope. A structured `BAD_REQUEST`
/// envelope in the body is passed through unchanged, whatever the HTTP
/// status was.
pub struct ApiClient {
    http_client: HttpClient,
    base_url: String
}

impl ApiClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080";

    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into()
        }
    }

    async fn get_envelope<T: DeserializeOwned>(&self, path: &str) -> ApiResponse<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");

        let response = match self.http_client.get(&url).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!("Request to {url} failed: {error}");
                return ApiResponse::runtime_error(error.to_string());
            }
        };

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResponse<T> {
        let status = response.status();

        match response.json::<ApiResponse<T>>().await {
            Ok(envelope) => envelope,
            Err(error) => {
                warn!("Response ({status}) did not carry an envelope: {error}");
                ApiResponse::runtime_error(error.to_string())
            }
        }
    }
}

impl TransactionApi for ApiClient {
    async fn fetch_balance(&self) -> ApiResponse<Decimal> {
        self.get_envelope("/transactions/balance").await
    }

    async fn fetch_failed_transactions(&self) -> ApiResponse<Vec<Transaction>> {
        self.get_envelope("/transactions/issues").await
    }

    async fn upload_csv(&self, file_name: String, contents: Vec<u8>) -> ApiResponse<()> {
        let url = format!("{}/transactions/upload", self.base_url);
        debug!("POST {url} ({file_name}, {} bytes)", contents.len());

        let part = match Part::bytes(contents).file_name(file_name).mime_str("text/csv") {
            Ok(part) => part,
            Err(error) => return ApiResponse::runtime_error(error.to_string())
        };
        let form = Form::new().part("file", part);

        let response = match self.http_client.post(&url).multipart(form).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!("Upload to {url} failed: {error}");
                return ApiResponse::runtime_error(error.to_string());
            }
        };

        Self::decode(response).await
    }
}
