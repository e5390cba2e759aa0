//! Plan command implementation
//!
//! Validates the baker's inputs, saves them to the session and prints the
//! schedule.

use anyhow::Result;
use tracing::info;

use super::{parse_day, CommandContext};
use crate::bake::{BakeConfig, BakeInputs};
use crate::cli::args::PlanArgs;
use crate::session::SavedBake;

/// Plan a new bake
pub async fn run_plan_command(ctx: &CommandContext, args: PlanArgs) -> Result<()> {
    let config = plan_config(&args)?;
    let now = ctx.current_instant(args.now.as_deref())?;
    let day = match args.date.as_deref() {
        Some(raw) => parse_day(raw)?,
        None => ctx.today(now),
    };

    if args.no_save {
        info!("Not saving the planned bake");
    } else {
        let mut session = ctx.open_session()?;
        session.save(&SavedBake::new(BakeInputs::from(&config), day))?;
    }

    ctx.present_bake(&config, day, now, args.json)
}

/// Turn command-line arguments into a validated bake configuration
pub fn plan_config(args: &PlanArgs) -> crate::error::Result<BakeConfig> {
    BakeInputs {
        start_time: args.start.clone(),
        cold_proof: !args.room_proof,
        flour_type: args.flour.parse()?,
        bake_vessel: args.vessel.parse()?,
        starter_type: args.starter.parse()?,
        room_temp: args.room_temp.parse()?,
        bulk_override: args.bulk_hours,
        cold_proof_hours: Some(args.cold_proof_hours),
        hydration_pct: args.hydration,
        flour_weight_g: args.flour_weight,
    }
    .validate()
}
