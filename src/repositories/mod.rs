pub mod diff;
pub mod job_status;

pub use diff::DiffRepository;
pub use job_status::JobStatusRepository;
