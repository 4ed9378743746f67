pub mod common;
pub mod diff;
pub mod duplication;

pub use common::require_param;
pub use diff::{
    delete_diff, get_diff_details, get_diffs_by_type, get_jobs_status, DiffDetailsParams,
    DiffResponse, DiffsByTypeParams, JobsStatusResponse,
};
pub use duplication::{
    handle_duplication, DuplicationOptions, DuplicationRequest, DuplicationResponse,
};
