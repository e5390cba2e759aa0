//! Planner configuration loading
//!
//! See [`planner_config`] for the layering rules and the supported keys.

pub mod planner_config;

pub use planner_config::{
    global_config_path, load_planner_config, load_planner_config_with, project_config_path,
    ConfigSources, PlannerConfig, ENV_PREFIX, VALID_LOG_LEVELS,
};
