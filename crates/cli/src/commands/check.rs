//! check command - Validate path strings
//!
//! Purely syntactic: no configuration is loaded and no backend is contacted.

use clap::Args;
use dpath_core::is_valid_path_string;
use dpath_core::uri::has_gcs_scheme;
use serde::Serialize;
use std::fmt;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Validate path strings
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Paths to validate
    #[arg(required = true)]
    pub paths: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    path: String,
    kind: &'static str,
    valid: bool,
}

impl fmt::Display for CheckOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.valid { "valid" } else { "invalid" };
        write!(f, "{}\t{}\t{}", verdict, self.kind, self.path)
    }
}

fn check_path(path: &str) -> CheckOutput {
    CheckOutput {
        path: path.to_string(),
        kind: if has_gcs_scheme(path) { "object" } else { "local" },
        valid: is_valid_path_string(path),
    }
}

/// Execute the check command
pub fn execute(args: CheckArgs, formatter: &Formatter) -> ExitCode {
    let results: Vec<CheckOutput> = args.paths.iter().map(|p| check_path(p)).collect();
    let all_valid = results.iter().all(|r| r.valid);

    for result in &results {
        formatter.output(result);
    }

    if all_valid {
        ExitCode::Success
    } else {
        ExitCode::UsageError
    }
}
