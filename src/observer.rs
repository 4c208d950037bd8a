//! Hooks invoked by [`PetClient`](crate::pet_client::PetClient) around every call.

use crate::pet_client::ApiResponse;
use reqwest::Method;
use serde_json::Value;

pub trait HttpObserver: Send + Sync {
    /// Whether the hooks record anything at all.
    fn enabled(&self) -> bool {
        true
    }

    fn on_request(&self, method: &Method, url: &str, body: Option<&Value>);

    fn on_response(&self, response: &ApiResponse);

    /// A response was received, but with a non-2xx status.
    fn on_error_response(&self, response: &ApiResponse);

    /// No response was received at all.
    fn on_network_error(&self, url: &str, error: &reqwest::Error);
}

/// Logs the full traffic through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl HttpObserver for TracingObserver {
    fn on_request(&self, method: &Method, url: &str, body: Option<&Value>) {
        match body {
            Some(body) => tracing::info!(
                http.method = %method,
                http.url = %url,
                "REQUEST BODY: {}",
                pretty(body)
            ),
            None => tracing::info!(http.method = %method, http.url = %url, "REQUEST"),
        }
    }

    fn on_response(&self, response: &ApiResponse) {
        tracing::info!(
            http.status_code = response.status.as_u16(),
            "RESPONSE DATA: {}",
            pretty(&response.body)
        );
    }

    fn on_error_response(&self, response: &ApiResponse) {
        tracing::warn!(
            http.status_code = response.status.as_u16(),
            "ERROR RESPONSE DATA: {}",
            pretty(&response.body)
        );
    }

    fn on_network_error(&self, url: &str, error: &reqwest::Error) {
        tracing::error!(http.url = %url, error.cause_chain = ?error, "NETWORK ERROR: {}", error);
    }
}

/// Discards all traffic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl HttpObserver for NoopObserver {
    fn enabled(&self) -> bool {
        false
    }

    fn on_request(&self, _method: &Method, _url: &str, _body: Option<&Value>) {}

    fn on_response(&self, _response: &ApiResponse) {}

    fn on_error_response(&self, _response: &ApiResponse) {}

    fn on_network_error(&self, _url: &str, _error: &reqwest::Error) {}
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
