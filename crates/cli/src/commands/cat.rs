//! cat command - Display text content
//!
//! Reads the whole file or object, decodes it and writes it to stdout.

use clap::Args;
use std::io::{self, Write};

use super::Context;
use crate::exit_code::ExitCode;

/// Print the text content of a file or object
#[derive(Args, Debug)]
pub struct CatArgs {
    /// Local path or gs://bucket/key
    pub path: String,
}

/// Execute the cat command
pub async fn execute(args: CatArgs, ctx: &Context) -> ExitCode {
    let handle = match ctx.factory.create(&args.path) {
        Ok(h) => h,
        Err(e) => {
            ctx.formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    match handle.read_text_with(ctx.encoding).await {
        Ok(text) => {
            // Write directly to stdout, content is not a formatted message
            if let Err(e) = io::stdout().write_all(text.as_bytes()) {
                ctx.formatter
                    .error(&format!("Failed to write to stdout: {e}"));
                return ExitCode::GeneralError;
            }
            ExitCode::Success
        }
        Err(e) => {
            ctx.formatter.error(&format!("Failed to read {handle}: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
