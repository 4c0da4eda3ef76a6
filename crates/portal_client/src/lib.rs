//! Placement portal API client.
//!
//! Owns the wire contract for the bulk student upload: where credentials
//! live, the college-scoped endpoint, the request and response bodies, and
//! the confirm-then-submit gate in front of it.
//!
//! Blocking only. One request per submission, no retries.

mod auth;
mod client;
mod submit;

pub use auth::{
    AuthCredentials, AuthError, auth_file_path,
    load_auth, load_auth_from, save_auth, save_auth_to, delete_auth, delete_auth_at,
};
pub use client::{
    PortalClient, PortalError, CollegeRoster,
    BulkAddResponse, UploadResult, FailedStudent,
    describe_student, GENERIC_UPLOAD_FAILURE,
};
pub use submit::{confirm_prompt, Confirm, StudentSink, Submitter, SubmitOutcome, SubmitError};
