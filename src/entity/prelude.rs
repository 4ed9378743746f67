pub use super::diff::Entity as Diff;
pub use super::job_status::Entity as JobStatus;
