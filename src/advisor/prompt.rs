//! Prompt construction for troubleshooting requests

use super::catalog::Stage;
use super::image::ImageAttachment;
use crate::bake::BakeConfig;
use crate::error::Result;

pub const SYSTEM_PROMPT: &str = "You are an expert sourdough baking coach helping users \
troubleshoot their bread. They will submit a short message describing their issue and an \
image of their dough or loaf. Provide clear, concise, encouraging feedback based on what \
they share. Avoid jargon. Offer practical advice and likely causes of any issues.";

/// Everything sent to the vision model for one question
#[derive(Debug, Clone)]
pub struct AdviceRequest {
    pub stage: Stage,
    pub issue: String,
    pub image: ImageAttachment,
    /// The active bake serialized as JSON, when there is one
    pub bake_context: Option<String>,
}

impl AdviceRequest {
    /// Build a request, resolving the issue wording against the stage's list
    pub fn new(stage: Stage, issue: &str, image: ImageAttachment) -> Result<Self> {
        Ok(Self {
            stage,
            issue: stage.resolve_issue(issue)?,
            image,
            bake_context: None,
        })
    }

    /// Attach the active bake so the model knows the schedule and recipe
    pub fn with_bake(mut self, config: &BakeConfig) -> Result<Self> {
        self.bake_context = Some(config.to_context_json()?);
        Ok(self)
    }

    /// The text part of the user message
    pub fn user_message(&self) -> String {
        let mut message = format!("Stage: {}\nIssue: {}\n", self.stage, self.issue);
        if let Some(context) = &self.bake_context {
            message.push_str(&format!("Bake context: {}\n", context));
        }
        message.push_str("Please review the attached image.");
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bake::BakeInputs;

    fn image() -> ImageAttachment {
        ImageAttachment::new("loaf.jpg", "image/jpeg", b"jpeg".to_vec()).unwrap()
    }

    #[test]
    fn test_user_message_without_bake() {
        let request = AdviceRequest::new(Stage::Baking, "pale crust", image()).unwrap();
        assert_eq!(
            request.user_message(),
            "Stage: Baking\nIssue: Pale crust\nPlease review the attached image."
        );
    }

    #[test]
    fn test_user_message_with_bake_context() {
        let config = BakeInputs::default().validate().unwrap();
        let request = AdviceRequest::new(Stage::ColdProof, "Overproofed", image())
            .unwrap()
            .with_bake(&config)
            .unwrap();

        let message = request.user_message();
        assert!(message.starts_with("Stage: Cold Proof\nIssue: Overproofed\nBake context: {"));
        assert!(message.contains("\"cold_proof_hours\":10"));
        assert!(message.ends_with("Please review the attached image."));
    }
}
