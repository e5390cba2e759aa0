//! Reset command implementation

use anyhow::Result;

use super::CommandContext;

/// Forget the saved bake
pub async fn run_reset_command(ctx: &CommandContext) -> Result<()> {
    let mut session = ctx.open_session()?;
    session.clear()?;
    println!(
        "Cleared the saved bake in session '{}'. Run `sourdough plan` to start again.",
        ctx.config.session
    );
    Ok(())
}
