//! Progress classification
//!
//! Annotates each step of a schedule against the current instant. A step is
//! done once `now >= step.time`; the first step that is not done is the next
//! one; everything after it is upcoming. Marker steps never become the next
//! step, so the first pending action after a marker takes that place. Without
//! a `now` nothing can be classified and every step is reported as upcoming.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::step::Step;

/// Display status of a step relative to the current time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Done,
    Next,
    Upcoming,
}

/// A step together with its status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedStep {
    #[serde(flatten)]
    pub step: Step,
    pub status: StepStatus,
}

/// Annotated schedule plus a summary of where the bake stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub steps: Vec<AnnotatedStep>,
    /// False when no current time was available
    pub annotated: bool,
    pub completed: usize,
    pub next_index: Option<usize>,
}

impl Progress {
    /// Every step has been reached
    pub fn is_finished(&self) -> bool {
        self.annotated && self.completed == self.steps.len()
    }

    /// The step the baker should do next, if any
    pub fn next_step(&self) -> Option<&AnnotatedStep> {
        self.next_index.map(|i| &self.steps[i])
    }
}

/// Classify each step against `now`
pub fn classify(steps: &[Step], now: Option<NaiveDateTime>) -> Vec<AnnotatedStep> {
    let mut next_assigned = false;
    steps
        .iter()
        .map(|step| {
            let status = match now {
                Some(now) if now >= step.time => StepStatus::Done,
                Some(_) if !next_assigned && !step.kind.is_marker() => {
                    next_assigned = true;
                    StepStatus::Next
                }
                _ => StepStatus::Upcoming,
            };
            AnnotatedStep {
                step: step.clone(),
                status,
            }
        })
        .collect()
}

/// Classify and summarise progress through a schedule
pub fn progress(steps: &[Step], now: Option<NaiveDateTime>) -> Progress {
    let annotated = classify(steps, now);
    let completed = annotated
        .iter()
        .filter(|s| s.status == StepStatus::Done)
        .count();
    let next_index = annotated.iter().position(|s| s.status == StepStatus::Next);

    Progress {
        steps: annotated,
        annotated: now.is_some(),
        completed,
        next_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::StepKind;
    use chrono::{NaiveDate, NaiveTime};

    fn t(hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(hh, mm, 0).unwrap())
    }

    fn steps() -> Vec<Step> {
        vec![
            Step::new(t(10, 0), StepKind::Autolyse, "a"),
            Step::new(t(11, 0), StepKind::StartBulk, "b"),
            Step::new(t(12, 0), StepKind::EndBulk, "c"),
        ]
    }

    fn statuses(annotated: &[AnnotatedStep]) -> Vec<StepStatus> {
        annotated.iter().map(|s| s.status).collect()
    }

    #[test]
    fn test_midway_marks_first_pending_as_next() {
        let result = classify(&steps(), Some(t(11, 30)));
        assert_eq!(
            statuses(&result),
            vec![StepStatus::Done, StepStatus::Done, StepStatus::Next]
        );
    }

    #[test]
    fn test_exact_time_counts_as_done() {
        let result = classify(&steps(), Some(t(11, 0)));
        assert_eq!(
            statuses(&result),
            vec![StepStatus::Done, StepStatus::Done, StepStatus::Next]
        );
    }

    #[test]
    fn test_before_start_first_step_is_next() {
        let result = classify(&steps(), Some(t(9, 0)));
        assert_eq!(
            statuses(&result),
            vec![StepStatus::Next, StepStatus::Upcoming, StepStatus::Upcoming]
        );
    }

    #[test]
    fn test_after_end_everything_done() {
        let summary = progress(&steps(), Some(t(12, 0)));
        assert!(summary.is_finished());
        assert_eq!(summary.next_index, None);
        assert!(summary.next_step().is_none());
    }

    #[test]
    fn test_without_now_nothing_is_annotated() {
        let summary = progress(&steps(), None);
        assert!(!summary.annotated);
        assert!(!summary.is_finished());
        assert_eq!(summary.completed, 0);
        assert!(summary
            .steps
            .iter()
            .all(|s| s.status == StepStatus::Upcoming));
    }

    #[test]
    fn test_shared_timestamps_classify_together() {
        let mut steps = steps();
        steps.insert(2, Step::new(t(11, 0), StepKind::Fold(1), "fold"));
        let summary = progress(&steps, Some(t(11, 0)));

        assert_eq!(summary.completed, 3);
        assert_eq!(summary.next_index, Some(3));
        assert_eq!(summary.next_step().unwrap().step.label, "c");
    }

    #[test]
    fn test_marker_is_never_next() {
        let steps = vec![
            Step::new(t(10, 0), StepKind::ColdProof, "fridge"),
            Step::new(t(20, 0), StepKind::NextDay, "Next Day"),
            Step::new(t(20, 0), StepKind::Preheat, "preheat"),
            Step::new(t(21, 0), StepKind::Bake, "bake"),
        ];
        let summary = progress(&steps, Some(t(15, 0)));

        assert_eq!(
            statuses(&summary.steps),
            vec![
                StepStatus::Done,
                StepStatus::Upcoming,
                StepStatus::Next,
                StepStatus::Upcoming
            ]
        );
        assert_eq!(summary.next_step().unwrap().step.kind, StepKind::Preheat);

        let arrived = progress(&steps, Some(t(20, 0)));
        assert_eq!(arrived.steps[1].status, StepStatus::Done);
        assert_eq!(arrived.next_step().unwrap().step.kind, StepKind::Bake);
    }

    #[test]
    fn test_reclassifying_with_refreshed_time() {
        let steps = steps();
        let early = progress(&steps, Some(t(10, 30)));
        let later = progress(&steps, Some(t(11, 30)));

        assert_eq!(early.next_index, Some(1));
        assert_eq!(later.next_index, Some(2));
        assert_eq!(progress(&steps, Some(t(10, 30))), early);
    }
}
