//! Bake timeline scheduling and progress tracking
//!
//! - [`build_timeline`] turns a [`BakeConfig`](crate::bake::BakeConfig) into an
//!   ordered, non-decreasing list of [`Step`]s
//! - [`progress`] annotates those steps as done, next or upcoming for a given
//!   current time
//!
//! Both are pure: the same inputs always give the same output, so callers
//! simply recompute whenever the configuration or the clock changes.

pub mod builder;
pub mod progress;
pub mod step;

pub use builder::{build_timeline, build_timeline_at, Milestones, Timeline};
pub use progress::{classify, progress, AnnotatedStep, Progress, StepStatus};
pub use step::{Step, StepKind};
