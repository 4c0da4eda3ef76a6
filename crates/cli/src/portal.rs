//! Portal commands: login, logout, and upload.
//!
//! `placement login`    : store a portal token
//! `placement logout`   : forget it
//! `placement upload`   : decode → validate → confirm → one POST

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use placement_config::{Settings, DEFAULT_API_BASE};
use placement_engine::UploadBatch;
use placement_portal_client::{
    delete_auth, describe_student, load_auth, save_auth,
    AuthCredentials, BulkAddResponse, PortalClient, PortalError, SubmitOutcome, Submitter,
};

use crate::exit_codes::*;
use crate::import::{import_options, load_rows, print_validation_errors};
use crate::CliError;

// ── Login ───────────────────────────────────────────────────────────

pub fn cmd_login(
    token: Option<String>,
    api_base: Option<String>,
    college: Option<String>,
) -> Result<(), CliError> {
    // Resolve token: --token flag / PLACEMENT_TOKEN > interactive prompt
    let token = match token {
        Some(t) if !t.trim().is_empty() => t.trim().to_string(),
        _ if atty::is(atty::Stream::Stdin) => {
            let entered = prompt_line("Portal API token: ")?;
            if entered.is_empty() {
                return Err(CliError::args("No token provided")
                    .with_hint("pass --token or set PLACEMENT_TOKEN"));
            }
            entered
        }
        _ => {
            return Err(CliError::args("No token provided and stdin is not a TTY")
                .with_hint("pass --token or set PLACEMENT_TOKEN"));
        }
    };

    let settings = Settings::load();
    let api_base = non_blank(api_base)
        .or(non_blank(settings.api_base))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    let creds = AuthCredentials {
        token,
        api_base,
        college_id: non_blank(college).or(settings.college_id),
    };
    let path = save_auth(&creds).map_err(auth_error)?;

    eprintln!("Saved token for {} to {}", creds.api_base.trim_end_matches('/'), path.display());
    Ok(())
}

pub fn cmd_logout() -> Result<(), CliError> {
    if delete_auth().map_err(auth_error)? {
        eprintln!("Logged out");
    } else {
        eprintln!("Not logged in");
    }
    Ok(())
}

// ── Upload ──────────────────────────────────────────────────────────

/// Where an upload goes and with which token, after precedence is applied:
/// flag/env > settings.json > auth.json > built-in default.
#[derive(Debug, PartialEq)]
struct Target {
    api_base: String,
    college_id: String,
    token: String,
}

fn resolve_target(
    college: Option<String>,
    api_base: Option<String>,
    token: Option<String>,
    settings: &Settings,
    saved: Option<AuthCredentials>,
) -> Result<Target, CliError> {
    let (saved_token, saved_base, saved_college) = match saved {
        Some(c) => (Some(c.token), Some(c.api_base), c.college_id),
        None => (None, None, None),
    };

    let token = non_blank(token)
        .or(non_blank(saved_token))
        .ok_or_else(|| portal_error(PortalError::NotAuthenticated))?;

    let college_id = non_blank(college)
        .or_else(|| non_blank(settings.college_id.clone()))
        .or(non_blank(saved_college))
        .ok_or_else(|| {
            CliError::args("No college selected")
                .with_hint("pass --college, set PLACEMENT_COLLEGE_ID, or set portal.collegeId in settings.json")
        })?;

    let api_base = non_blank(api_base)
        .or_else(|| non_blank(settings.api_base.clone()))
        .or(non_blank(saved_base))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    Ok(Target { api_base, college_id, token })
}

/// Saved login for an upload. A broken auth.json only matters when it is
/// the token source; with a usable token flag it is logged and skipped.
fn saved_login(token: Option<&str>) -> Result<Option<AuthCredentials>, CliError> {
    match load_auth() {
        Ok(saved) => Ok(saved),
        Err(e) if token.map_or(false, |t| !t.trim().is_empty()) => {
            log::warn!("{}", e);
            Ok(None)
        }
        Err(e) => Err(auth_error(e)),
    }
}

pub fn cmd_upload(
    file: PathBuf,
    college: Option<String>,
    api_base: Option<String>,
    token: Option<String>,
    yes: bool,
    json: bool,
) -> Result<(), CliError> {
    let settings = Settings::load();
    let saved = saved_login(token.as_deref())?;
    let target = resolve_target(college, api_base, token, &settings, saved)?;

    let rows = load_rows(&file)?;
    let batch = UploadBatch::from_rows(&rows, &import_options(None, None));

    if batch.has_errors() {
        eprintln!("{} of {} row(s) failed validation:", batch.invalid_rows(), batch.len());
        print_validation_errors(&batch.errors);
    }

    let client = PortalClient::new(
        AuthCredentials::new(target.token, target.api_base),
        Duration::from_secs(settings.timeout_secs),
    )
    .map_err(portal_error)?;
    log::info!("uploading {} student(s) to {}", batch.len(), client.bulk_students_url(&target.college_id));

    let submitter = Submitter::new(client.college(target.college_id.as_str()));
    let interactive = atty::is(atty::Stream::Stdin);
    let mut confirm = |prompt: &str| {
        if yes {
            return true;
        }
        if !interactive {
            eprintln!("{} (not a TTY; pass --yes to upload anyway)", prompt);
            return false;
        }
        matches!(
            prompt_line(&format!("{} [y/N] ", prompt)).as_deref(),
            Ok("y") | Ok("Y") | Ok("yes") | Ok("Yes")
        )
    };

    match submitter.submit(&batch, &mut confirm).map_err(submit_error)? {
        SubmitOutcome::Declined => Err(CliError::new(EXIT_DECLINED, "Upload cancelled")),
        SubmitOutcome::Submitted(response) => {
            if json {
                let out = serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(e.to_string()))?;
                println!("{}", out);
            } else {
                print_human_result(&response);
            }
            Ok(())
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// `None` for a missing or whitespace-only value, so it falls through to the next source.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn prompt_line(prompt: &str) -> Result<String, CliError> {
    eprint!("{}", prompt);
    io::stderr().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(|e| CliError::io(e.to_string()))?;
    Ok(buf.trim().to_string())
}

fn print_human_result(r: &BulkAddResponse) {
    eprintln!();
    if let Some(ref message) = r.message {
        eprintln!("  {}", message);
    }
    eprintln!("  Added:   {}", r.data.success.len());
    eprintln!("  Failed:  {}", r.data.failed.len());
    for student in &r.data.success {
        println!("ok      {}", describe_student(student));
    }
    for failed in &r.data.failed {
        println!("failed  {}: {}", failed.label(), failed.error);
    }
    eprintln!();
}
