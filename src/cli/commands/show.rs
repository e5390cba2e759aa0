//! Show command implementation
//!
//! Prints the saved bake of the session with progress markers.

use anyhow::Result;

use super::CommandContext;

/// Show the saved bake
pub async fn run_show_command(ctx: &CommandContext, now: Option<String>, json: bool) -> Result<()> {
    let session = ctx.open_session()?;
    let Some(saved) = session.load()? else {
        println!(
            "No saved bake in session '{}'. Run `sourdough plan` to start one.",
            ctx.config.session
        );
        return Ok(());
    };

    let config = saved
        .inputs
        .validate()
        .map_err(|e| e.with_context("run `sourdough reset` to start again"))?;
    let now = ctx.current_instant(now.as_deref())?;
    let day = saved.started_on.unwrap_or_else(|| ctx.today(now));

    ctx.present_bake(&config, day, now, json)
}
