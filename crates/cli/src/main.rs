// Placement CLI - bulk student roster validation and upload

mod exit_codes;
mod import;
mod logging;
mod portal;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use placement_config::Settings;
use placement_engine::{template::TEMPLATE_FILE_NAME, ZeroCgpa};
use placement_io::template::{write_template, TemplateFormat};

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "placement")]
#[command(about = "Validate student rosters and bulk-upload them to the placement portal")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). PLACEMENT_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a roster file against the upload rules
    #[command(after_help = "\
Examples:
  placement validate students.xlsx
  placement validate students.csv --json | jq '.errors[].row'

Exit status is 3 when any row has a validation error.")]
    Validate {
        /// Roster file (.xlsx, .xls or .csv)
        file: PathBuf,

        /// Print a JSON report on stdout
        #[arg(long)]
        json: bool,

        /// How a CGPA of exactly 0 is treated
        #[arg(long, value_enum)]
        zero_cgpa: Option<ZeroCgpaArg>,
    },

    /// Print the records that would be uploaded, as JSON
    #[command(after_help = "\
Examples:
  placement normalize students.xlsx
  placement normalize students.csv --batch-year 2026 -o students.json")]
    Normalize {
        /// Roster file (.xlsx, .xls or .csv)
        file: PathBuf,

        /// Write JSON here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// How a CGPA of exactly 0 is treated
        #[arg(long, value_enum)]
        zero_cgpa: Option<ZeroCgpaArg>,

        /// Batch year for rows without one (default: settings, then current year)
        #[arg(long)]
        batch_year: Option<i32>,
    },

    /// Validate, confirm, and submit a roster to a college in one request
    #[command(after_help = "\
Examples:
  placement upload students.xlsx --college col_42
  placement upload students.csv --yes --json

Rows with validation errors are still sent if you confirm; the portal
reports per-student failures in its response.")]
    Upload {
        /// Roster file (.xlsx, .xls or .csv)
        file: PathBuf,

        /// College whose roster receives the students
        #[arg(long, env = "PLACEMENT_COLLEGE_ID")]
        college: Option<String>,

        /// Portal base URL
        #[arg(long, env = "PLACEMENT_API_BASE")]
        api_base: Option<String>,

        /// Bearer token (default: saved by `placement login`)
        #[arg(long, env = "PLACEMENT_TOKEN", hide_env_values = true, hide = true)]
        token: Option<String>,

        /// Upload without asking even if rows have validation errors
        #[arg(long, short = 'y')]
        yes: bool,

        /// Print the portal's response as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Write a blank upload template with one sample row
    #[command(after_help = "\
Examples:
  placement template
  placement template -o roster.csv
  placement template -o roster --format csv")]
    Template {
        /// Output path
        #[arg(long, short = 'o', default_value = TEMPLATE_FILE_NAME)]
        output: PathBuf,

        /// File format (default: from the output extension)
        #[arg(long, value_enum)]
        format: Option<TemplateFormatArg>,
    },

    /// Save a portal token for later uploads
    Login {
        /// Bearer token (prompted on a TTY if omitted)
        #[arg(long, env = "PLACEMENT_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Portal base URL
        #[arg(long, env = "PLACEMENT_API_BASE")]
        api_base: Option<String>,

        /// Default college for uploads made with this token
        #[arg(long)]
        college: Option<String>,
    },

    /// Forget the saved portal token
    Logout,

    /// Show the settings file path and effective settings
    Config {
        /// Write a commented settings file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ZeroCgpaArg {
    /// CGPA 0 is treated as not provided
    Absent,
    /// CGPA 0 is a real grade
    Value,
}

impl From<ZeroCgpaArg> for ZeroCgpa {
    fn from(arg: ZeroCgpaArg) -> Self {
        match arg {
            ZeroCgpaArg::Absent => ZeroCgpa::Absent,
            ZeroCgpaArg::Value => ZeroCgpa::Value,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TemplateFormatArg {
    Xlsx,
    Csv,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  placement-engine ", env!("CARGO_PKG_VERSION"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Validate { file, json, zero_cgpa } => {
            import::cmd_validate(file, json, zero_cgpa.map(Into::into))
        }
        Commands::Normalize { file, output, zero_cgpa, batch_year } => {
            import::cmd_normalize(file, output, zero_cgpa.map(Into::into), batch_year)
        }
        Commands::Upload { file, college, api_base, token, yes, json } => {
            portal::cmd_upload(file, college, api_base, token, yes, json)
        }
        Commands::Template { output, format } => cmd_template(output, format),
        Commands::Login { token, api_base, college } => portal::cmd_login(token, api_base, college),
        Commands::Logout => portal::cmd_logout(),
        Commands::Config { init } => cmd_config(init),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            tracing::debug!(code, "command failed");
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Exit with `code` without printing anything further.
    pub fn silent(code: u8) -> Self {
        Self::new(code, "")
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// template
// ============================================================================

fn cmd_template(output: PathBuf, format: Option<TemplateFormatArg>) -> Result<(), CliError> {
    let format = match format {
        Some(TemplateFormatArg::Xlsx) => TemplateFormat::Xlsx,
        Some(TemplateFormatArg::Csv) => TemplateFormat::Csv,
        None => TemplateFormat::from_path(&output),
    };

    write_template(&output, format)
        .map_err(|e| CliError::io(format!("Cannot write {}: {}", output.display(), e)))?;

    eprintln!("Wrote {}", output.display());
    Ok(())
}

// ============================================================================
// config
// ============================================================================

fn cmd_config(init: bool) -> Result<(), CliError> {
    let path = Settings::config_path();

    if init {
        let created = Settings::create_default_file(&path).map_err(CliError::io)?;
        if created {
            eprintln!("Created {}", path.display());
        } else {
            eprintln!("{} already exists", path.display());
        }
    }

    let settings = Settings::load_from(&path);
    let effective = serde_json::to_string_pretty(&settings)
        .map_err(|e| CliError::io(e.to_string()))?;

    println!("# {}", Settings::config_path_display());
    println!("{}", effective);
    Ok(())
}
