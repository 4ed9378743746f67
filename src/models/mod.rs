pub mod diff;
pub mod job_status;

pub use diff::*;
pub use job_status::*;
