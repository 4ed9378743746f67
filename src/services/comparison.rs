use std::time::Instant;
use uuid::Uuid;

use crate::config::{Config, EndpointConfig};
use crate::error::{AppError, AppResult};
use crate::models::{Diff, DiffCategory, DiffMetadata};
use crate::services::curl::generate_curl_command;
use crate::services::fetcher::{FetchedResponse, HttpFetcher};
use crate::services::normalizer::{format_json, normalize_json};

/// Stand-in status for the caller-supplied side of a duplication comparison
const EXPECTED_STATUS_CODE: u16 = 200;

/// Outcome of one comparison call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonResult {
    NoDifference,
    Difference(Diff),
    /// The comparison could not run; never counted as a difference
    Failed(String),
}

impl ComparisonResult {
    pub fn has_difference(&self) -> bool {
        matches!(self, Self::Difference(_))
    }

    pub fn diff(&self) -> Option<&Diff> {
        match self {
            Self::Difference(diff) => Some(diff),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Where and how both sides were requested
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub endpoint: String,
    pub method: String,
    pub duration_ms: i64,
    pub prod_url: String,
    pub integ_url: String,
}

/// A duplicated production request replayed against a test environment
#[derive(Debug, Clone)]
pub struct DuplicationInput {
    pub test_url: String,
    pub source_url: String,
    pub content: String,
    pub expected_response: String,
}

/// Compare two responses: status code first, then normalized JSON bodies.
/// Bodies are only compared when both sides are JSON.
pub fn compare_responses(
    prod: &FetchedResponse,
    integ: &FetchedResponse,
    context: &RequestContext,
) -> Option<Diff> {
    if prod.status_code != integ.status_code {
        return Some(build_diff(DiffCategory::StatusCode, prod, integ, context));
    }

    if prod.is_json && integ.is_json && normalize_json(&prod.body) != normalize_json(&integ.body) {
        return Some(build_diff(DiffCategory::JsonResponse, prod, integ, context));
    }

    None
}

fn build_diff(
    category: DiffCategory,
    prod: &FetchedResponse,
    integ: &FetchedResponse,
    context: &RequestContext,
) -> Diff {
    let (prod_value, integ_value) = match category {
        DiffCategory::StatusCode => (prod.status_code.to_string(), integ.status_code.to_string()),
        DiffCategory::JsonResponse => (format_json(&prod.body), format_json(&integ.body)),
    };

    Diff {
        id: Uuid::new_v4().to_string(),
        category: category.as_str().to_string(),
        // Callers that track jobs overwrite this with their own job ID
        job_id: Uuid::new_v4().to_string(),
        job_name: format!("{} {}", context.method, context.endpoint),
        timestamp: time::OffsetDateTime::now_utc(),
        diff_type: category.diff_type().as_str().to_string(),
        prod_normalized_response: prod_value.clone(),
        integ_normalized_response: integ_value.clone(),
        prod_ignored_fields: None,
        integ_ignored_fields: None,
        prod_curl_request: generate_curl_command(&context.prod_url, &context.method),
        integ_curl_request: generate_curl_command(&context.integ_url, &context.method),
        metadata: Some(DiffMetadata {
            endpoint: Some(context.endpoint.clone()),
            method: Some(context.method.clone()),
            duration_ms: Some(context.duration_ms),
        }),
        old_value: prod_value,
        new_value: integ_value,
    }
}

/// Fetches both sides of a comparison and diffs them
pub struct ComparisonService {
    fetcher: HttpFetcher,
    production_base_url: Option<String>,
    integration_base_url: Option<String>,
}

impl ComparisonService {
    pub fn new(
        fetcher: HttpFetcher,
        production_base_url: Option<String>,
        integration_base_url: Option<String>,
    ) -> Self {
        Self {
            fetcher,
            production_base_url,
            integration_base_url,
        }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let fetcher = HttpFetcher::new(config.http_timeout())?;
        Ok(Self::new(
            fetcher,
            config.production_base_url.clone(),
            config.integration_base_url.clone(),
        ))
    }

    /// Compare one endpoint between production and integration
    pub async fn compare_endpoint(&self, endpoint: &EndpointConfig) -> ComparisonResult {
        match self.try_compare_endpoint(endpoint).await {
            Ok(Some(diff)) => ComparisonResult::Difference(diff),
            Ok(None) => ComparisonResult::NoDifference,
            Err(e) => {
                tracing::error!(
                    endpoint = %endpoint.path,
                    method = %endpoint.method,
                    error = %e,
                    "Error comparing endpoints"
                );
                ComparisonResult::Failed(failure_message(e))
            }
        }
    }

    async fn try_compare_endpoint(&self, endpoint: &EndpointConfig) -> AppResult<Option<Diff>> {
        let (prod_base, integ_base) = match (&self.production_base_url, &self.integration_base_url)
        {
            (Some(prod), Some(integ)) => (prod, integ),
            _ => {
                return Err(AppError::Comparison(
                    "API base URLs not configured".to_string(),
                ))
            }
        };

        let prod_url = join_url(prod_base, &endpoint.path);
        let integ_url = join_url(integ_base, &endpoint.path);

        let start = Instant::now();
        let prod = self.fetcher.fetch(&prod_url, &endpoint.method, None).await?;
        let integ = self.fetcher.fetch(&integ_url, &endpoint.method, None).await?;
        let duration_ms = start.elapsed().as_millis() as i64;

        let context = RequestContext {
            endpoint: endpoint.path.clone(),
            method: endpoint.method.clone(),
            duration_ms,
            prod_url,
            integ_url,
        };

        Ok(compare_responses(&prod, &integ, &context))
    }

    /// Replay a duplicated request against the test URL and compare it to
    /// the expected (production) response, assumed to be a 200 JSON body
    pub async fn compare_duplicated(&self, input: &DuplicationInput) -> ComparisonResult {
        match self.try_compare_duplicated(input).await {
            Ok(Some(diff)) => ComparisonResult::Difference(diff),
            Ok(None) => ComparisonResult::NoDifference,
            Err(e) => {
                tracing::error!(test_url = %input.test_url, error = %e, "Error comparing duplicated request");
                ComparisonResult::Failed(failure_message(e))
            }
        }
    }

    async fn try_compare_duplicated(&self, input: &DuplicationInput) -> AppResult<Option<Diff>> {
        let method = "POST";

        let start = Instant::now();
        let test = self
            .fetcher
            .fetch(&input.test_url, method, Some(&input.content))
            .await?;
        let duration_ms = start.elapsed().as_millis() as i64;

        let expected = FetchedResponse {
            status_code: EXPECTED_STATUS_CODE,
            body: input.expected_response.clone(),
            is_json: true,
        };

        let context = RequestContext {
            endpoint: extract_endpoint(&input.test_url),
            method: method.to_string(),
            duration_ms,
            prod_url: input.source_url.clone(),
            integ_url: input.test_url.clone(),
        };

        Ok(compare_responses(&expected, &test, &context))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Path and query of a URL, or the input itself if it does not parse
fn extract_endpoint(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) => match parsed.query() {
            Some(query) => format!("{}?{}", parsed.path(), query),
            None => parsed.path().to_string(),
        },
        Err(_) => url.to_string(),
    }
}

fn failure_message(err: AppError) -> String {
    match err {
        AppError::Comparison(message) | AppError::Internal(message) => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status_code: u16, body: &str, is_json: bool) -> FetchedResponse {
        FetchedResponse {
            status_code,
            body: body.to_string(),
            is_json,
        }
    }

    fn context() -> RequestContext {
        RequestContext {
            endpoint: "/api/v1/users".to_string(),
            method: "GET".to_string(),
            duration_ms: 12,
            prod_url: "https://api.production.com/api/v1/users".to_string(),
            integ_url: "https://api.integration.com/api/v1/users".to_string(),
        }
    }

    #[test]
    fn test_identical_responses_have_no_difference() {
        let prod = response(200, r#"{"id":1}"#, true);
        let integ = response(200, r#"{"id":1}"#, true);

        assert!(compare_responses(&prod, &integ, &context()).is_none());
    }

    #[test]
    fn test_status_code_mismatch() {
        let prod = response(200, r#"{"ok":true}"#, true);
        let integ = response(503, "Service Unavailable", false);

        let diff = compare_responses(&prod, &integ, &context()).unwrap();
        assert_eq!(diff.category, "status_code");
        assert_eq!(diff.diff_type, "status_code");
        assert_eq!(diff.prod_normalized_response, "200");
        assert_eq!(diff.integ_normalized_response, "503");
        assert_eq!(diff.old_value, "200");
        assert_eq!(diff.new_value, "503");
    }

    #[test]
    fn test_status_code_checked_before_body() {
        let prod = response(200, r#"{"a":1}"#, true);
        let integ = response(404, r#"{"a":2}"#, true);

        let diff = compare_responses(&prod, &integ, &context()).unwrap();
        assert_eq!(diff.category, "status_code");
    }

    #[test]
    fn test_json_body_mismatch() {
        let prod = response(200, r#"{"name":"alice","age":30}"#, true);
        let integ = response(200, r#"{"name":"alice","age":31}"#, true);

        let diff = compare_responses(&prod, &integ, &context()).unwrap();
        assert_eq!(diff.category, "json_response");
        assert_eq!(diff.diff_type, "body");
        assert_eq!(
            diff.prod_normalized_response,
            "{\n  \"age\": 30,\n  \"name\": \"alice\"\n}"
        );
        assert_eq!(
            diff.integ_normalized_response,
            "{\n  \"age\": 31,\n  \"name\": \"alice\"\n}"
        );
    }

    #[test]
    fn test_whitespace_and_key_order_are_not_differences() {
        let prod = response(200, r#"{"a":1,"b":2}"#, true);
        let integ = response(200, "{ \"b\": 2,\n  \"a\": 1 }", true);

        assert!(compare_responses(&prod, &integ, &context()).is_none());
    }

    #[test]
    fn test_non_json_bodies_are_not_compared() {
        let prod = response(200, "<html>prod</html>", false);
        let integ = response(200, "<html>integ</html>", false);
        assert!(compare_responses(&prod, &integ, &context()).is_none());

        let mixed = response(200, r#"{"a":1}"#, true);
        assert!(compare_responses(&mixed, &integ, &context()).is_none());
    }

    #[test]
    fn test_diff_carries_metadata_and_curl() {
        let prod = response(200, "{}", true);
        let integ = response(500, "{}", true);

        let diff = compare_responses(&prod, &integ, &context()).unwrap();
        assert_eq!(diff.job_name, "GET /api/v1/users");
        assert!(diff
            .prod_curl_request
            .starts_with("curl -X GET 'https://api.production.com/api/v1/users'"));
        assert!(diff
            .integ_curl_request
            .starts_with("curl -X GET 'https://api.integration.com/api/v1/users'"));
        assert!(diff.prod_ignored_fields.is_none());
        assert!(diff.integ_ignored_fields.is_none());

        let metadata = diff.metadata.unwrap();
        assert_eq!(metadata.endpoint.as_deref(), Some("/api/v1/users"));
        assert_eq!(metadata.method.as_deref(), Some("GET"));
        assert_eq!(metadata.duration_ms, Some(12));
    }

    #[test]
    fn test_extract_endpoint() {
        assert_eq!(
            extract_endpoint("https://test.example.com/api/v1/search?q=shoes&page=2"),
            "/api/v1/search?q=shoes&page=2"
        );
        assert_eq!(extract_endpoint("https://test.example.com"), "/");
        assert_eq!(extract_endpoint("not a url"), "not a url");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://prod.example.com/", "/api"), "https://prod.example.com/api");
        assert_eq!(join_url("https://prod.example.com", "/api"), "https://prod.example.com/api");
    }

    #[tokio::test]
    async fn test_missing_base_urls_fail_without_difference() {
        let service = ComparisonService::new(HttpFetcher::new(None).unwrap(), None, None);
        let endpoint = EndpointConfig {
            path: "/api/v1/users".to_string(),
            method: "GET".to_string(),
        };

        let result = service.compare_endpoint(&endpoint).await;
        assert!(!result.has_difference());
        assert_eq!(result.error_message(), Some("API base URLs not configured"));
    }
}
