//! CLI argument structures
//!
//! This module defines the command-line interface of the `sourdough` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Plan a sourdough bake and follow it step by step
#[derive(Parser)]
#[command(name = "sourdough")]
#[command(about = "sourdough - Plan your bake, track where you are, and get help when it goes wrong", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Session holding the active bake (overrides config)
    #[arg(long, global = true, value_name = "NAME")]
    pub session: Option<String>,

    /// Directory where sessions are stored (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan a new bake, save it and print the schedule
    #[command(name = "plan")]
    Plan(PlanArgs),

    /// Show the saved bake with progress markers (default command)
    #[command(name = "show")]
    Show {
        /// Current instant to track progress against (ISO-8601, e.g. 2024-05-04T15:30:00Z)
        #[arg(long, value_name = "INSTANT")]
        now: Option<String>,

        /// Print the schedule as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forget the saved bake and start again
    #[command(name = "reset")]
    Reset,

    /// Work out ingredient weights for a loaf
    #[command(name = "weights")]
    Weights {
        /// Flour weight in grams (250-700)
        #[arg(long, default_value = "500", value_name = "GRAMS")]
        flour_weight: u32,

        /// Hydration in percent of flour weight (60-85)
        #[arg(long, default_value = "70", value_name = "PERCENT")]
        hydration: u32,
    },

    /// Ask a baking coach about a photo of your dough or loaf
    #[command(name = "troubleshoot")]
    Troubleshoot {
        /// Stage of the bake (e.g. "Bulk Fermentation")
        #[arg(long)]
        stage: String,

        /// What went wrong, or one of the issues listed by `sourdough issues`
        #[arg(long, default_value = "Just looking for feedback!")]
        issue: String,

        /// JPEG or PNG photo
        #[arg(long, value_name = "FILE")]
        image: PathBuf,

        /// Do not send the saved bake along with the question
        #[arg(long)]
        no_bake_context: bool,
    },

    /// List baking stages and their common issues
    #[command(name = "issues")]
    Issues {
        /// Only list issues for this stage
        #[arg(long)]
        stage: Option<String>,
    },
}

/// Inputs for planning a bake
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Time you mix flour and water (HH:MM)
    #[arg(long, default_value = "14:00", value_name = "HH:MM")]
    pub start: String,

    /// Proof at room temperature instead of overnight in the fridge
    #[arg(long)]
    pub room_proof: bool,

    /// Hours in the fridge (6-24)
    #[arg(long, default_value = "10", value_name = "HOURS")]
    pub cold_proof_hours: u32,

    /// Bulk fermentation hours (3-6); defaults from the room temperature
    #[arg(long, value_name = "HOURS")]
    pub bulk_hours: Option<f64>,

    /// Room temperature: cold, moderate or warm
    #[arg(long, default_value = "Moderate")]
    pub room_temp: String,

    /// Flour type (e.g. "Strong White", "Whole Wheat", "Rye")
    #[arg(long, default_value = "Strong White")]
    pub flour: String,

    /// Bake vessel (e.g. "Dutch Oven", "Loaf Tin")
    #[arg(long, default_value = "Dutch Oven")]
    pub vessel: String,

    /// Starter type (e.g. "White", "Rye")
    #[arg(long, default_value = "White")]
    pub starter: String,

    /// Hydration in percent of flour weight (60-85)
    #[arg(long, default_value = "70", value_name = "PERCENT")]
    pub hydration: u32,

    /// Flour weight in grams (250-700)
    #[arg(long, default_value = "500", value_name = "GRAMS")]
    pub flour_weight: u32,

    /// Day the bake starts (YYYY-MM-DD); defaults to today
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Current instant to track progress against (ISO-8601)
    #[arg(long, value_name = "INSTANT")]
    pub now: Option<String>,

    /// Print the schedule without saving it to the session
    #[arg(long)]
    pub no_save: bool,

    /// Print the schedule as JSON
    #[arg(long)]
    pub json: bool,
}
