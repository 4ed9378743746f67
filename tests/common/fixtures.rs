use diff_monitor::models::{Diff, DiffMetadata};
use time::OffsetDateTime;

/// A stored diff with the given identity, as the comparator would build it
#[allow(dead_code)]
pub fn sample_diff(id: &str, category: &str, timestamp: OffsetDateTime) -> Diff {
    let (diff_type, prod, integ) = if category == "status_code" {
        ("status_code", "200".to_string(), "503".to_string())
    } else {
        (
            "body",
            "{\n  \"total\": 10\n}".to_string(),
            "{\n  \"total\": 11\n}".to_string(),
        )
    };

    Diff {
        id: id.to_string(),
        category: category.to_string(),
        job_id: format!("job-{}", id),
        job_name: "GET /api/v1/orders".to_string(),
        timestamp,
        diff_type: diff_type.to_string(),
        prod_normalized_response: prod.clone(),
        integ_normalized_response: integ.clone(),
        prod_ignored_fields: None,
        integ_ignored_fields: None,
        prod_curl_request: "curl -X GET 'https://prod.example.com/api/v1/orders'".to_string(),
        integ_curl_request: "curl -X GET 'https://integ.example.com/api/v1/orders'".to_string(),
        metadata: Some(DiffMetadata {
            endpoint: Some("/api/v1/orders".to_string()),
            method: Some("GET".to_string()),
            duration_ms: Some(42),
        }),
        old_value: prod,
        new_value: integ,
    }
}
