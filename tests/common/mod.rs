pub mod app;
pub mod fixtures;
pub mod stores;
pub mod upstream;

#[allow(unused_imports)]
pub use app::{test_config, TestApp};
#[allow(unused_imports)]
pub use fixtures::sample_diff;
#[allow(unused_imports)]
pub use upstream::{spawn_upstream, unused_base_url};
#[allow(unused_imports)]
pub use stores::BrokenJobStatusStore;
