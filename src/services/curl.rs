/// Build a curl command for reproducing a compared request by hand.
/// Never executed; stored on the diff for display.
pub fn generate_curl_command(url: &str, method: &str) -> String {
    format!(
        "curl -X {} '{}' \\\n  -H 'Content-Type: application/json' \\\n  -H 'Accept: application/json'",
        method, url
    )
}
