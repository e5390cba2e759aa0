//! Troubleshoot command implementation
//!
//! Sends a photo with the stage and issue to the vision model and prints the
//! answer. The saved bake is never modified here.

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use super::CommandContext;
use crate::advisor::{self, AdviceRequest, ImageAttachment, OpenAiVisionClient, Stage};
use crate::cli::render::render_advice;

/// Ask for advice about a photo
pub async fn run_troubleshoot_command(
    ctx: &CommandContext,
    stage: &str,
    issue: &str,
    image: &Path,
    no_bake_context: bool,
) -> Result<()> {
    let request = build_request(ctx, stage, issue, image, no_bake_context)?;
    let client = OpenAiVisionClient::new(ctx.config.openai_settings()?)?;

    eprintln!("Analyzing your image...");
    let advice = advisor::troubleshoot(&client, &request).await?;
    debug!(model = %advice.model, tokens = ?advice.tokens_used, "Advice received");

    print!("{}", render_advice(&advice));
    Ok(())
}

/// Validate the question and attach the saved bake when wanted
pub fn build_request(
    ctx: &CommandContext,
    stage: &str,
    issue: &str,
    image: &Path,
    no_bake_context: bool,
) -> crate::error::Result<AdviceRequest> {
    let stage: Stage = stage.parse()?;
    let image = ImageAttachment::from_path(image)?;
    let request = AdviceRequest::new(stage, issue, image)?;

    if no_bake_context || !ctx.config.attach_bake_context {
        return Ok(request);
    }
    match ctx.active_bake()? {
        Some(config) => request.with_bake(&config),
        None => Ok(request),
    }
}
