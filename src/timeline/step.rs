use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which part of the bake a step belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Autolyse,
    StartBulk,
    /// Stretch & fold, numbered from 1
    Fold(u8),
    EndBulk,
    Shape,
    ColdProof,
    /// Day-boundary marker between the fridge and the oven
    NextDay,
    RoomProof,
    Preheat,
    Bake,
    Cool,
    Eat,
}

impl StepKind {
    /// Markers separate sections of the schedule rather than asking the baker to act
    pub fn is_marker(&self) -> bool {
        matches!(self, Self::NextDay)
    }
}

/// A single timestamped instruction in the bake schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Local wall-clock time at which the step happens
    pub time: NaiveDateTime,
    pub kind: StepKind,
    pub label: String,
}

impl Step {
    pub fn new(time: NaiveDateTime, kind: StepKind, label: impl Into<String>) -> Self {
        Self {
            time,
            kind,
            label: label.into(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.time.format("%H:%M"), self.label)
    }
}
