//! put command - Write stdin to a file or object
//!
//! Reads all of stdin as text and writes it with the selected encoding,
//! creating or overwriting the target. Parent directories are not created;
//! run `mkdir` first for local targets.

use clap::Args;
use serde::Serialize;
use std::fmt;
use std::io;

use super::Context;
use crate::exit_code::ExitCode;

/// Write stdin as the text content of a file or object
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local path or gs://bucket/key
    pub path: String,
}

#[derive(Debug, Serialize)]
struct PutOutput {
    status: &'static str,
    path: String,
    encoding: String,
    chars: usize,
}

impl fmt::Display for PutOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wrote {} chars ({}) to {}", self.chars, self.encoding, self.path)
    }
}

/// Execute the put command
pub async fn execute(args: PutArgs, ctx: &Context) -> ExitCode {
    let handle = match ctx.factory.create(&args.path) {
        Ok(h) => h,
        Err(e) => {
            ctx.formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    let content = match io::read_to_string(io::stdin()) {
        Ok(c) => c,
        Err(e) => {
            ctx.formatter
                .error(&format!("Failed to read from stdin: {e}"));
            return ExitCode::GeneralError;
        }
    };

    match handle.write_text_with(&content, ctx.encoding).await {
        Ok(()) => {
            let output = PutOutput {
                status: "success",
                path: handle.to_string(),
                encoding: ctx.encoding.to_string(),
                chars: content.chars().count(),
            };
            if ctx.formatter.is_json() {
                ctx.formatter.output(&output);
            } else {
                ctx.formatter.success(&output.to_string());
            }
            ExitCode::Success
        }
        Err(e) => {
            ctx.formatter.error(&format!("Failed to write {handle}: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
