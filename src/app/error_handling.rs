//! Error handling utilities
//!
//! This module provides centralized error handling for the application.

use tracing::error;

use crate::error::PlannerError;

/// Handle fatal errors and exit with appropriate status code
///
/// - For `PlannerError`: shows the user message, plus the developer message in verbose mode
/// - For other errors: shows the error and, in verbose mode, its chain
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);
    eprintln!("{}", render_fatal_error(&error, verbose));
    std::process::exit(exit_code_for(&error))
}

/// Text printed for a fatal error
pub fn render_fatal_error(error: &anyhow::Error, verbose: u8) -> String {
    if let Some(planner_err) = error.downcast_ref::<PlannerError>() {
        let mut text = planner_err.user_message();
        if verbose >= 1 {
            text.push_str("\n\nContext Chain:\n");
            text.push_str(&planner_err.developer_message());
        }
        return text;
    }

    let mut text = format!("Error: {error}");
    if verbose >= 1 {
        text.push_str("\n\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            text.push_str(&format!("\n  {}: {}", i, cause));
        }
    }
    text
}

/// Exit status for a fatal error
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<PlannerError>()
        .map(PlannerError::exit_code)
        .unwrap_or(1)
}
