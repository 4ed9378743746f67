pub mod comparison;
pub mod curl;
pub mod fetcher;
pub mod normalizer;
pub mod runner;

pub use comparison::{compare_responses, ComparisonResult, ComparisonService, DuplicationInput, RequestContext};
pub use curl::generate_curl_command;
pub use fetcher::{FetchedResponse, HttpFetcher};
pub use normalizer::{format_json, normalize_json};
pub use runner::{DiffRunner, RunSummary};
