pub mod diff;
pub mod job_status;

pub mod prelude;

pub use prelude::*;
