//! exists command - Report whether a file or object exists
//!
//! Exits with 0 when the target exists and with the not-found code when it
//! doesn't, so it can be used directly in shell conditionals.

use clap::Args;
use serde::Serialize;
use std::fmt;

use super::Context;
use crate::exit_code::ExitCode;

/// Report whether a file or object exists
#[derive(Args, Debug)]
pub struct ExistsArgs {
    /// Local path or gs://bucket/key
    pub path: String,
}

#[derive(Debug, Serialize)]
struct ExistsOutput {
    path: String,
    exists: bool,
}

impl fmt::Display for ExistsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.exists)
    }
}

/// Execute the exists command
pub async fn execute(args: ExistsArgs, ctx: &Context) -> ExitCode {
    let handle = match ctx.factory.create(&args.path) {
        Ok(h) => h,
        Err(e) => {
            ctx.formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    match handle.exists().await {
        Ok(exists) => {
            ctx.formatter.output(&ExistsOutput {
                path: handle.to_string(),
                exists,
            });
            if exists {
                ExitCode::Success
            } else {
                ExitCode::NotFound
            }
        }
        Err(e) => {
            ctx.formatter.error(&format!("Failed to check {handle}: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
