//! Command routing and execution
//!
//! This module handles routing CLI commands to their respective implementations.

use anyhow::Result;

use crate::cli::args::{Cli, Commands};
use crate::cli::commands::*;
use crate::config::PlannerConfig;

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(cli: Cli, config: PlannerConfig) -> Result<()> {
    let ctx = CommandContext::new(config).with_overrides(cli.session, cli.state_dir)?;

    match cli.command {
        Some(Commands::Plan(args)) => run_plan_command(&ctx, args).await,
        Some(Commands::Show { now, json }) => run_show_command(&ctx, now, json).await,
        Some(Commands::Reset) => run_reset_command(&ctx).await,
        Some(Commands::Weights {
            flour_weight,
            hydration,
        }) => run_weights_command(flour_weight, hydration).await,
        Some(Commands::Troubleshoot {
            stage,
            issue,
            image,
            no_bake_context,
        }) => run_troubleshoot_command(&ctx, &stage, &issue, &image, no_bake_context).await,
        Some(Commands::Issues { stage }) => run_issues_command(stage).await,
        // Without a command, show where the current bake stands
        None => run_show_command(&ctx, None, false).await,
    }
}
