//! # Sourdough Planner
//!
//! Plan a sourdough bake from a handful of preferences, follow it step by step
//! and ask a vision model for help when the dough misbehaves.
//!
//! ## Usage
//!
//! ```bash
//! sourdough plan [--start 16:30] [--room-proof] [--bulk-hours 4] [--flour-weight 500]
//! sourdough show [--now 2024-05-04T18:00:00Z]
//! sourdough troubleshoot --stage "Bulk Fermentation" --issue "Dough not rising" --image dough.jpg
//! ```
//!
//! ## Modules
//!
//! - `bake` - Bake inputs, validated configuration and ingredient weights
//! - `timeline` - Schedule builder and progress classification
//! - `clock` - Injected time sources
//! - `session` - Persistence of the active bake in a key-value store
//! - `advisor` - Photo troubleshooting through a vision-capable model
//! - `config` - Layered application configuration
//! - `app` - Logging and fatal error handling for the binary
//! - `cli` - Command-line interface
pub mod advisor;
pub mod app;
pub mod bake;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod session;
pub mod timeline;

pub use error::{AppResult, PlannerError, Result};
