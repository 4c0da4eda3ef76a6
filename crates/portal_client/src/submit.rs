//! Confirm-then-submit gate in front of the bulk endpoint.

use std::sync::atomic::{AtomicBool, Ordering};

use placement_engine::{NormalizedStudent, UploadBatch};

use crate::client::{BulkAddResponse, PortalError};

/// Asks the operator a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Where a confirmed batch goes.
pub trait StudentSink {
    fn add_students(&self, students: &[NormalizedStudent]) -> Result<BulkAddResponse, PortalError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Operator declined the validation-error prompt; nothing was sent
    Declined,
    Submitted(BulkAddResponse),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Another submission through the same submitter has not finished
    InFlight,
    /// Batch has no rows
    Empty,
    Portal(PortalError),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::InFlight => write!(f, "An upload is already in progress"),
            SubmitError::Empty => write!(f, "No student rows to upload"),
            SubmitError::Portal(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<PortalError> for SubmitError {
    fn from(e: PortalError) -> Self {
        SubmitError::Portal(e)
    }
}

/// Prompt text shown when `invalid` rows failed validation.
pub fn confirm_prompt(invalid: usize) -> String {
    format!("{} row(s) have validation errors. Upload anyway?", invalid)
}

/// Sends a whole batch in one request, at most one at a time.
pub struct Submitter<S> {
    sink: S,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: StudentSink> Submitter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, in_flight: AtomicBool::new(false) }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Gate and submit. Rows with validation errors are still sent if the
    /// operator agrees; the server decides per record.
    pub fn submit(
        &self,
        batch: &UploadBatch,
        confirm: &mut dyn Confirm,
    ) -> Result<SubmitOutcome, SubmitError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmitError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        if batch.is_empty() {
            return Err(SubmitError::Empty);
        }

        if batch.has_errors() && !confirm.confirm(&confirm_prompt(batch.invalid_rows())) {
            log::info!("upload declined with {} invalid row(s)", batch.invalid_rows());
            return Ok(SubmitOutcome::Declined);
        }

        let response = self.sink.add_students(&batch.students)?;
        log::info!(
            "upload finished: {} succeeded, {} failed",
            response.data.success.len(),
            response.data.failed.len()
        );
        Ok(SubmitOutcome::Submitted(response))
    }
}
