//! CLI command handlers
//!
//! This module contains all CLI-related functionality:
//! - Argument parsing structures
//! - Command implementations
//! - Terminal rendering

pub mod args;
pub mod commands;
pub mod render;
pub mod router;

// Re-export the main CLI structures for convenience
pub use args::{Cli, Commands, PlanArgs};
pub use commands::CommandContext;
pub use router::execute_command;
