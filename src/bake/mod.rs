//! Bake inputs, validated configuration and derived ingredient weights
//!
//! Raw [`BakeInputs`] come from the command line or from the saved session.
//! [`BakeInputs::validate`] turns them into a [`BakeConfig`], which the
//! timeline builder consumes. [`DoughWeights`] are pure functions of the
//! configuration.

pub mod config;
pub mod options;
pub mod weights;

pub use config::{parse_start_time, BakeConfig, BakeInputs};
pub use options::{BakeOption, BakeVessel, FlourType, RoomTemp, StarterType};
pub use weights::DoughWeights;
