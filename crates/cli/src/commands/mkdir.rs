//! mkdir command - Ensure a directory exists

use clap::Args;

use super::Context;
use crate::exit_code::ExitCode;

/// Create a directory and its parents
#[derive(Args, Debug)]
pub struct MkdirArgs {
    /// Local directory or gs://bucket/prefix
    pub path: String,
}

/// Execute the mkdir command
pub async fn execute(args: MkdirArgs, ctx: &Context) -> ExitCode {
    let handle = match ctx.factory.create(&args.path) {
        Ok(h) => h,
        Err(e) => {
            ctx.formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    match handle.ensure_container().await {
        Ok(()) => {
            if handle.is_object() {
                ctx.formatter
                    .success(&format!("{handle}: object storage needs no directories"));
            } else {
                ctx.formatter.success(&format!("Created {handle}"));
            }
            ExitCode::Success
        }
        Err(e) => {
            ctx.formatter
                .error(&format!("Failed to create {handle}: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
