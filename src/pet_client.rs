use crate::domain::{ApiMessage, Pet};
use crate::locator;
use crate::observer::HttpObserver;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

/// Status and decoded body of one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// Top-level field of an object body, `None` when absent or not an object.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }

    pub fn message(&self) -> Option<&str> {
        self.field("message").and_then(Value::as_str)
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        self.body.as_array()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.body)
    }

    pub fn api_message(&self) -> Result<ApiMessage, serde_json::Error> {
        self.json()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PetClientError {
    #[error("No response received from {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request failed with status {}", .0.status)]
    Http(ApiResponse),
    #[error("Failed to encode the request body")]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to build the HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

pub trait ResponseExt {
    /// Treats an error response as the actual response, leaving other failures untouched.
    fn accept_error_status(self) -> Result<ApiResponse, PetClientError>;
}

impl ResponseExt for Result<ApiResponse, PetClientError> {
    fn accept_error_status(self) -> Result<ApiResponse, PetClientError> {
        match self {
            Err(PetClientError::Http(response)) => Ok(response),
            other => other,
        }
    }
}

/// Page object over the pet resource: one method per REST operation.
#[derive(Clone)]
pub struct PetClient {
    base_url: String,
    http_client: Client,
    observer: Arc<dyn HttpObserver>,
}

impl std::fmt::Debug for PetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PetClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PetClient {
    pub fn new(
        base_url: String,
        timeout: Duration,
        observer: Arc<dyn HttpObserver>,
    ) -> Result<Self, PetClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(PetClientError::ClientBuild)?;
        Ok(Self {
            base_url,
            http_client,
            observer,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn logs_traffic(&self) -> bool {
        self.observer.enabled()
    }

    #[tracing::instrument(name = "Creating pet", skip(self))]
    pub async fn create_pet(&self, pet: &Pet) -> Result<ApiResponse, PetClientError> {
        self.send(Method::POST, locator::PET, Some(pet)).await
    }

    #[tracing::instrument(name = "Fetching pet by id", skip(self, id), fields(pet_id = %id))]
    pub async fn get_pet_by_id(&self, id: impl Display) -> Result<ApiResponse, PetClientError> {
        self.send(Method::GET, &locator::pet_by_id(id), None).await
    }

    #[tracing::instrument(name = "Updating pet", skip(self))]
    pub async fn update_pet(&self, pet: &Pet) -> Result<ApiResponse, PetClientError> {
        self.send(Method::PUT, locator::PET, Some(pet)).await
    }

    #[tracing::instrument(name = "Finding pets by status", skip(self))]
    pub async fn find_pets_by_status(&self, status: &str) -> Result<ApiResponse, PetClientError> {
        self.send(Method::GET, &locator::find_by_status(status), None).await
    }

    #[tracing::instrument(name = "Deleting pet", skip(self, id), fields(pet_id = %id))]
    pub async fn delete_pet(&self, id: impl Display) -> Result<ApiResponse, PetClientError> {
        self.send(Method::DELETE, &locator::pet_by_id(id), None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        pet: Option<&Pet>,
    ) -> Result<ApiResponse, PetClientError> {
        let url = format!("{}{}", self.base_url, path);
        let body = pet.map(serde_json::to_value).transpose()?;
        self.observer.on_request(&method, &url, body.as_ref());

        let mut request = self.http_client.request(method, &url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let outcome = match request.send().await {
            Ok(response) => {
                let status = response.status();
                response.bytes().await.map(|bytes| (status, bytes))
            }
            Err(e) => Err(e),
        };
        let (status, bytes) = match outcome {
            Ok(received) => received,
            Err(e) => {
                self.observer.on_network_error(&url, &e);
                return Err(PetClientError::Network { url, source: e });
            }
        };

        let response = ApiResponse {
            status,
            body: decode_body(&bytes),
        };
        if status.is_success() {
            self.observer.on_response(&response);
            Ok(response)
        } else {
            self.observer.on_error_response(&response);
            Err(PetClientError::Http(response))
        }
    }
}

/// JSON when possible, otherwise the raw text as a JSON string.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
