//! Photo troubleshooting through a vision-capable language model
//!
//! The baker picks a [`Stage`], describes an issue and attaches a photo. The
//! request is sent to a [`VisionClient`] together with the active bake, if
//! any, and the model's free-text answer is returned untouched. Failures stay
//! inside this module's error variant and never affect the saved bake.

pub mod catalog;
pub mod client;
pub mod image;
pub mod prompt;

pub use catalog::{Stage, GENERAL_FEEDBACK};
pub use client::{Advice, OpenAiSettings, OpenAiVisionClient, VisionClient};
pub use image::ImageAttachment;
pub use prompt::{AdviceRequest, SYSTEM_PROMPT};

use tracing::{error, info};

use crate::error::Result;

/// Ask the model for advice, logging the outcome
pub async fn troubleshoot(client: &dyn VisionClient, request: &AdviceRequest) -> Result<Advice> {
    info!(
        stage = %request.stage,
        issue = %request.issue,
        image = %request.image.file_name,
        with_bake = request.bake_context.is_some(),
        "Asking for troubleshooting advice"
    );

    match client.advise(request).await {
        Ok(advice) => Ok(advice),
        Err(e) => {
            error!("Troubleshooting request failed: {}", e);
            Err(e)
        }
    }
}
