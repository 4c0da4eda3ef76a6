//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: upload scripts branch on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain     | Description                              |
//! |---------|------------|------------------------------------------|
//! | 0       | Universal  | Success                                  |
//! | 1       | Universal  | General error (unspecified)              |
//! | 2       | Universal  | CLI usage error (bad args, missing file) |
//! | 3-9     | import     | Roster validation and decoding           |
//! | 10-19   | portal     | Authentication and upload                |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use placement_io::DecodeError;
use placement_portal_client::{AuthError, PortalError, SubmitError};

use crate::CliError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options, unreadable input.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Import (3-9)
// =============================================================================

/// At least one row failed validation (`validate`).
pub const EXIT_VALIDATION: u8 = 3;

/// The file could not be decoded into rows (unsupported type, corrupt workbook).
pub const EXIT_PARSE: u8 = 4;

/// Upload declined at the validation-error prompt (or non-interactive without --yes).
pub const EXIT_DECLINED: u8 = 5;

// =============================================================================
// Portal (10-19)
// =============================================================================

/// No token saved or provided, or the portal refused it (401).
pub const EXIT_NOT_AUTH: u8 = 10;

/// Could not reach the portal (DNS, refused, timeout, TLS).
pub const EXIT_NETWORK: u8 = 11;

/// Portal answered with an error status or an unreadable body.
pub const EXIT_PORTAL_REJECTED: u8 = 12;

// =============================================================================
// Error mapping
// =============================================================================

pub fn decode_error(err: DecodeError) -> CliError {
    match err {
        DecodeError::UnsupportedFormat(_) => CliError {
            code: EXIT_PARSE,
            message: err.to_string(),
            hint: Some("export the roster as .xlsx, .xls or .csv".into()),
        },
        DecodeError::Io(msg) => CliError {
            code: EXIT_USAGE,
            message: msg,
            hint: None,
        },
        DecodeError::Parse(_) => CliError {
            code: EXIT_PARSE,
            message: err.to_string(),
            hint: Some("run `placement template` for a known-good starting file".into()),
        },
    }
}

pub fn portal_error(err: PortalError) -> CliError {
    match err {
        PortalError::NotAuthenticated => CliError {
            code: EXIT_NOT_AUTH,
            message: "Not authenticated".into(),
            hint: Some("run `placement login` first".into()),
        },
        PortalError::Network(msg) => CliError {
            code: EXIT_NETWORK,
            message: format!("Cannot reach the portal: {}", msg),
            hint: None,
        },
        PortalError::Http(401, msg) => CliError {
            code: EXIT_NOT_AUTH,
            message: msg,
            hint: Some("token may have expired; run `placement login` again".into()),
        },
        PortalError::Http(_, msg) => CliError {
            code: EXIT_PORTAL_REJECTED,
            message: msg,
            hint: None,
        },
        PortalError::Parse(msg) => CliError {
            code: EXIT_PORTAL_REJECTED,
            message: format!("Unexpected response: {}", msg),
            hint: None,
        },
    }
}

pub fn auth_error(err: AuthError) -> CliError {
    match err {
        AuthError::Invalid(_) => CliError {
            code: EXIT_USAGE,
            message: err.to_string(),
            hint: Some("check --token and --api-base".into()),
        },
        AuthError::Corrupt { .. } => CliError {
            code: EXIT_NOT_AUTH,
            message: err.to_string(),
            hint: Some("run `placement login` again".into()),
        },
        AuthError::NoConfigDir | AuthError::Io(_) => CliError {
            code: EXIT_ERROR,
            message: err.to_string(),
            hint: None,
        },
    }
}

pub fn submit_error(err: SubmitError) -> CliError {
    match err {
        SubmitError::Portal(e) => portal_error(e),
        SubmitError::Empty => CliError {
            code: EXIT_PARSE,
            message: err.to_string(),
            hint: Some("the first sheet needs a header row and at least one student row".into()),
        },
        SubmitError::InFlight => CliError {
            code: EXIT_ERROR,
            message: err.to_string(),
            hint: None,
        },
    }
}
