use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// What the comparator needs to know about one side's response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResponse {
    pub status_code: u16,
    pub body: String,
    pub is_json: bool,
}

/// HTTP client wrapper used for both sides of a comparison
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher. `None` keeps the client's default (no timeout).
    pub fn new(timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Issue a request, with `content` sent as a JSON body when non-empty
    pub async fn fetch(
        &self,
        url: &str,
        method: &str,
        content: Option<&str>,
    ) -> AppResult<FetchedResponse> {
        let method = parse_method(method)?;

        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");

        if let Some(content) = content.filter(|c| !c.is_empty()) {
            request = request
                .header(CONTENT_TYPE, "application/json; charset=utf-8")
                .body(content.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Comparison(format!("HTTP request to {} failed: {}", url, e)))?;

        let status_code = response.status().as_u16();
        let is_json = is_json_media_type(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );

        let body = response.text().await.map_err(|e| {
            AppError::Comparison(format!("Failed to read response body from {}: {}", url, e))
        })?;

        Ok(FetchedResponse {
            status_code,
            body,
            is_json,
        })
    }
}

/// Standard methods only; extension tokens are rejected
fn parse_method(method: &str) -> AppResult<Method> {
    match method.trim().to_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        "HEAD" => Ok(Method::HEAD),
        "OPTIONS" => Ok(Method::OPTIONS),
        _ => Err(AppError::Comparison(format!(
            "Unsupported HTTP method: {}",
            method
        ))),
    }
}

/// True only for `application/json`; parameters such as charset are ignored
pub fn is_json_media_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .map(|media_type| media_type.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
