//! Terminal rendering of schedules, weights and advice

use std::fmt::Write;

use crate::advisor::{Advice, Stage};
use crate::bake::{BakeConfig, DoughWeights};
use crate::timeline::{Progress, StepStatus};

pub const DONE_MARKER: &str = "✔";
pub const NEXT_MARKER: &str = "➜";

pub const FOLDING_GUIDE: &str = "\
1. Wet your hands to prevent sticking.
2. Grab one side of the dough, stretch it up gently, and fold it over to the opposite side.
3. Rotate the bowl a quarter turn and repeat. Do this four times to complete one full fold.
4. Let the dough rest, covered, until the next fold.
5. Each fold helps strengthen gluten and develop structure.";

pub const SHAPING_GUIDE: &str = "\
Flip dough seam-side down. Fold edges to center, flip again, and drag to create surface tension.";

/// The schedule, one step per line, with status markers when annotated
pub fn render_schedule(progress: &Progress) -> String {
    let mut out = String::from("Your Bake Schedule\n\n");

    for annotated in &progress.steps {
        let step = &annotated.step;
        if step.kind.is_marker() {
            out.push_str("------- Next Day -------\n");
            continue;
        }

        if progress.annotated {
            let marker = match annotated.status {
                StepStatus::Done => DONE_MARKER,
                StepStatus::Next => NEXT_MARKER,
                StepStatus::Upcoming => " ",
            };
            let _ = writeln!(out, "{} {}", marker, step);
        } else {
            let _ = writeln!(out, "{}", step);
        }
    }

    if progress.annotated {
        out.push('\n');
        match progress.next_step() {
            Some(next) => {
                let _ = writeln!(
                    out,
                    "Next up at {}: {}",
                    next.step.time.format("%H:%M"),
                    next.step.label
                );
            }
            None if progress.is_finished() => out.push_str("All done. Enjoy your bread!\n"),
            None => {}
        }
    }

    out
}

/// The bake preferences block
pub fn render_preferences(config: &BakeConfig) -> String {
    let mut out = String::from("Bake Preferences\n\n");
    let _ = writeln!(out, "Flour Type: {}", config.flour_type);
    let _ = writeln!(out, "Bake Vessel: {}", config.bake_vessel);
    let _ = writeln!(out, "Starter Type: {}", config.starter_type);
    let _ = writeln!(out, "Room Temp: {}", config.room_temp);
    let _ = writeln!(
        out,
        "Bulk Fermentation Time Adjusted to: {} hours",
        config.bulk_ferment_hours
    );
    if let Some(hours) = config.cold_proof_hours {
        let _ = writeln!(out, "Cold Proof Duration: {} hours", hours);
    }
    let _ = writeln!(out, "Hydration: {}%", config.hydration_pct);
    out
}

/// Ingredient weights
pub fn render_weights(weights: &DoughWeights) -> String {
    let mut out = String::from("Dough Weights\n\n");
    let _ = writeln!(out, "Flour:   {:>4}g", weights.flour_g);
    let _ = writeln!(out, "Water:   {:>4}g", weights.water_g);
    let _ = writeln!(out, "Starter: {:>4}g", weights.starter_g);
    let _ = writeln!(out, "Salt:    {:>4}g", weights.salt_g);
    let _ = writeln!(out, "Total:   {:>4}g", weights.total_g());
    out
}

/// How to fold and how to shape
pub fn render_guidance() -> String {
    format!(
        "How to fold the dough\n\n{}\n\nHow to shape the dough\n\n{}\n",
        FOLDING_GUIDE, SHAPING_GUIDE
    )
}

/// Everything shown for a bake, sections separated by rules
pub fn render_bake(progress: &Progress, config: &BakeConfig, weights: &DoughWeights) -> String {
    [
        render_schedule(progress),
        render_weights(weights),
        render_preferences(config),
        render_guidance(),
    ]
    .join("\n---\n\n")
}

/// Stages and their issues
pub fn render_issues(stages: &[Stage]) -> String {
    let mut out = String::new();
    for (i, stage) in stages.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", stage);
        for issue in stage.issue_choices() {
            let _ = writeln!(out, "  - {}", issue);
        }
    }
    out
}

pub fn render_advice(advice: &Advice) -> String {
    format!(
        "Here's what your sourdough expert says:\n\n{}\n",
        advice.text.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bake::BakeInputs;
    use crate::timeline::{build_timeline, progress};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 4).unwrap()
    }

    fn config() -> BakeConfig {
        BakeInputs {
            start_time: "16:30".to_string(),
            bulk_override: Some(4.0),
            ..BakeInputs::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_unannotated_schedule_has_no_markers() {
        let timeline = build_timeline(&config(), day()).unwrap();
        let text = render_schedule(&progress(timeline.steps(), None));

        assert!(text.contains("16:30 – Mix 500g Strong White flour & 350g water (Autolyse)\n"));
        assert!(text.contains("------- Next Day -------\n"));
        assert!(!text.contains(DONE_MARKER));
        assert!(!text.contains(NEXT_MARKER));
        assert!(!text.contains("Next up"));
    }

    #[test]
    fn test_annotated_schedule_marks_done_and_next() {
        let timeline = build_timeline(&config(), day()).unwrap();
        let now = day().and_hms_opt(18, 0, 0).unwrap();
        let text = render_schedule(&progress(timeline.steps(), Some(now)));

        assert!(text.contains("✔ 16:30 – Mix"));
        assert!(text.contains("✔ 17:30 – Stretch & fold #1"));
        assert!(text.contains("➜ 18:50 – Stretch & fold #2"));
        assert!(text.contains("  20:10 – Stretch & fold #3"));
        assert!(text.contains("Next up at 18:50: Stretch & fold #2"));
        assert_eq!(text.matches(NEXT_MARKER).count(), 1);
    }

    #[test]
    fn test_overnight_proof_points_at_preheat() {
        let timeline = build_timeline(&config(), day()).unwrap();
        let now = day().and_hms_opt(23, 0, 0).unwrap();
        let text = render_schedule(&progress(timeline.steps(), Some(now)));

        assert!(text.contains("✔ 22:00 – Place in fridge for 10h cold proof"));
        assert!(text.contains(
            "------- Next Day -------\n➜ 08:00 – Preheat oven to 250°C with the Dutch oven inside\n"
        ));
        assert!(text.contains("Next up at 08:00: Preheat oven"));
        assert!(!text.contains("Next up at 08:00: Next Day"));
        assert_eq!(text.matches(NEXT_MARKER).count(), 1);
    }

    #[test]
    fn test_finished_bake() {
        let timeline = build_timeline(&config(), day()).unwrap();
        let now = day().succ_opt().unwrap().and_hms_opt(12, 0, 0).unwrap();
        let text = render_schedule(&progress(timeline.steps(), Some(now)));
        assert!(text.ends_with("All done. Enjoy your bread!\n"));
    }

    #[test]
    fn test_preferences_block() {
        let text = render_preferences(&config());
        assert!(text.contains("Flour Type: Strong White"));
        assert!(text.contains("Bulk Fermentation Time Adjusted to: 4 hours"));
        assert!(text.contains("Cold Proof Duration: 10 hours"));
    }

    #[test]
    fn test_weights_block() {
        let text = render_weights(&DoughWeights::compute(500, 70));
        assert!(text.contains("Water:    350g"));
        assert!(text.contains("Starter:  100g"));
        assert!(text.contains("Salt:      10g"));
        assert!(text.contains("Total:    960g"));
    }

    #[test]
    fn test_issues_list_includes_general_feedback() {
        let text = render_issues(&[Stage::Shaping]);
        assert!(text.starts_with("Shaping\n"));
        assert!(text.contains("  - Just looking for feedback!"));
    }
}
