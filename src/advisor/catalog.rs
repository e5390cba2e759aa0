//! Baking stages and the common issues offered for each

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorCode, PlannerError};

/// Issue offered at every stage when nothing is wrong
pub const GENERAL_FEEDBACK: &str = "Just looking for feedback!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Mixing,
    Autolyse,
    BulkFermentation,
    Folding,
    Shaping,
    ColdProof,
    Baking,
    PostBake,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Mixing,
        Stage::Autolyse,
        Stage::BulkFermentation,
        Stage::Folding,
        Stage::Shaping,
        Stage::ColdProof,
        Stage::Baking,
        Stage::PostBake,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Mixing => "Mixing",
            Stage::Autolyse => "Autolyse",
            Stage::BulkFermentation => "Bulk Fermentation",
            Stage::Folding => "Folding",
            Stage::Shaping => "Shaping",
            Stage::ColdProof => "Cold Proof",
            Stage::Baking => "Baking",
            Stage::PostBake => "Post-Bake",
        }
    }

    /// Common problems bakers report at this stage
    pub fn common_issues(&self) -> &'static [&'static str] {
        match self {
            Stage::Mixing => &[
                "Dough isn’t coming together",
                "Dough is crumbly or dry",
                "Too wet and runny",
                "Hard to mix evenly",
            ],
            Stage::Autolyse => &[
                "Dough feels stiff after resting",
                "Very slack or wet",
                "Still dry/clumpy",
                "Doesn’t seem to help my dough",
            ],
            Stage::BulkFermentation => &[
                "Dough isn’t rising",
                "Too much rise",
                "No visible bubbles",
                "Surface has dried out",
                "Not sure when to stop",
            ],
            Stage::Folding => &[
                "Dough tears during fold",
                "Still sticky",
                "No strength developing",
                "Dough won’t hold shape",
            ],
            Stage::Shaping => &[
                "Too slack, won’t hold shape",
                "Sticks to surface/hands",
                "Tears during shaping",
                "Not sure it has enough tension",
            ],
            Stage::ColdProof => &[
                "Didn’t rise in fridge",
                "Spread out flat",
                "Formed a dry crust",
                "Overproofed",
            ],
            Stage::Baking => &[
                "No oven spring",
                "Crust burst",
                "Pale crust",
                "Burned bottom",
            ],
            Stage::PostBake => &[
                "Dense or gummy crumb",
                "No holes",
                "Weird smell or taste",
                "Undercooked in middle",
            ],
        }
    }

    /// Issues offered for this stage, including general feedback
    pub fn issue_choices(&self) -> Vec<&'static str> {
        let mut choices = self.common_issues().to_vec();
        choices.push(GENERAL_FEEDBACK);
        choices
    }

    /// Resolve the issue text for this stage
    ///
    /// Text matching a listed issue (ignoring case and punctuation) is replaced
    /// by the listed wording; anything else is passed through as the baker's
    /// own description.
    pub fn resolve_issue(&self, issue: &str) -> Result<String, PlannerError> {
        let trimmed = issue.trim();
        if trimmed.is_empty() {
            return Err(PlannerError::validation_with_code(
                ErrorCode::VALIDATION_UNKNOWN_ISSUE,
                "describe the issue or pick one from `sourdough issues`",
                Some("issue".to_string()),
            ));
        }

        let wanted = normalize(trimmed);
        Ok(self
            .issue_choices()
            .into_iter()
            .find(|choice| normalize(choice) == wanted)
            .map(str::to_string)
            .unwrap_or_else(|| trimmed.to_string()))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Stage::ALL
            .iter()
            .copied()
            .find(|stage| normalize(stage.label()) == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Stage::ALL.iter().map(|s| s.label()).collect();
                PlannerError::validation_with_code(
                    ErrorCode::VALIDATION_UNKNOWN_STAGE,
                    format!("'{}' is not one of: {}", s, names.join(", ")),
                    Some("stage".to_string()),
                )
            })
    }
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
