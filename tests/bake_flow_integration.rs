//! End-to-end tests of the library: inputs are validated, saved, reloaded,
//! turned into a schedule and classified against a clock.

use chrono::{NaiveDate, NaiveDateTime};
use sourdough_planner::bake::{BakeInputs, RoomTemp};
use sourdough_planner::clock::{self, ManualClock, TimeSource};
use sourdough_planner::session::{BakeSession, FileStore, SavedBake};
use sourdough_planner::timeline::{build_timeline, progress, StepKind, StepStatus};
use tempfile::TempDir;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 4).unwrap()
}

fn at(day_offset: u64, hh: u32, mm: u32) -> NaiveDateTime {
    day()
        .checked_add_days(chrono::Days::new(day_offset))
        .unwrap()
        .and_hms_opt(hh, mm, 0)
        .unwrap()
}

fn evening_inputs(cold_proof: bool) -> BakeInputs {
    BakeInputs {
        start_time: "16:30".to_string(),
        cold_proof,
        bulk_override: Some(4.0),
        ..BakeInputs::default()
    }
}

#[test]
fn test_saved_bake_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = evening_inputs(true);

    {
        let store = FileStore::open(temp_dir.path(), "default").unwrap();
        let mut session = BakeSession::new(store);
        let config = inputs.validate().unwrap();
        session
            .save(&SavedBake::new(BakeInputs::from(&config), day()))
            .unwrap();
    }

    let store = FileStore::open(temp_dir.path(), "default").unwrap();
    let saved = BakeSession::new(store).load().unwrap().unwrap();
    assert_eq!(saved.started_on, Some(day()));

    let config = saved.inputs.validate().unwrap();
    let timeline = build_timeline(&config, saved.started_on.unwrap()).unwrap();
    let kinds: Vec<StepKind> = timeline.steps().iter().map(|s| s.kind).collect();
    assert_eq!(kinds[kinds.len() - 5], StepKind::NextDay);
    assert_eq!(timeline.ends_at(), at(1, 11, 0));
}

#[test]
fn test_cold_proof_milestones() {
    let config = evening_inputs(true).validate().unwrap();
    let timeline = build_timeline(&config, day()).unwrap();
    let m = timeline.milestones();

    assert_eq!(m.shape_end, at(0, 22, 0));
    assert_eq!(m.proof_end, at(1, 8, 0));
    assert_eq!(m.preheat, at(1, 8, 0));
    assert_eq!(m.bake, at(1, 8, 45));
    assert_eq!(m.cool, at(1, 9, 30));
    assert_eq!(m.eat, at(1, 11, 0));
}

#[test]
fn test_room_proof_milestones() {
    let config = evening_inputs(false).validate().unwrap();
    let timeline = build_timeline(&config, day()).unwrap();
    let m = timeline.milestones();

    assert_eq!(m.shape_end, at(0, 22, 0));
    assert_eq!(m.proof_end, at(1, 1, 0));
    assert_eq!(m.preheat, at(1, 0, 15));
    assert_eq!(m.bake, at(1, 1, 0));
    assert_eq!(m.cool, at(1, 1, 45));
    assert_eq!(m.eat, at(1, 3, 15));
    assert_eq!(timeline.steps().len(), 12);
}

#[test]
fn test_progress_from_manual_clock() {
    let config = BakeInputs {
        room_temp: RoomTemp::Warm,
        ..evening_inputs(true)
    }
    .validate()
    .unwrap();
    // Explicit bulk hours override the room temperature default
    assert_eq!(config.bulk_ferment_hours, 4.0);

    let timeline = build_timeline(&config, day()).unwrap();
    let zone = chrono::FixedOffset::east_opt(2 * 3600).unwrap();

    // 20:00 UTC is 22:00 at UTC+2: shaping and the fridge are due together
    let mut source = ManualClock::from_iso("2024-05-04T20:00:00Z").unwrap();
    source.refresh();
    let now = source
        .last_known()
        .map(|instant| clock::wall_clock(instant, zone));
    let summary = progress(timeline.steps(), now);

    let shape = summary
        .steps
        .iter()
        .find(|s| s.step.kind == StepKind::Shape)
        .unwrap();
    let fridge = summary
        .steps
        .iter()
        .find(|s| s.step.kind == StepKind::ColdProof)
        .unwrap();
    assert_eq!(shape.status, StepStatus::Done);
    assert_eq!(fridge.status, StepStatus::Done);
    assert_eq!(summary.next_step().unwrap().step.kind, StepKind::NextDay);
}

#[test]
fn test_unavailable_clock_leaves_schedule_plain() {
    let config = evening_inputs(true).validate().unwrap();
    let timeline = build_timeline(&config, day()).unwrap();

    let mut source = ManualClock::unavailable();
    source.refresh();
    let summary = progress(timeline.steps(), source.last_known().map(|i| i.naive_local()));

    assert!(!summary.annotated);
    assert_eq!(summary.completed, 0);
    assert!(summary.next_step().is_none());
    assert!(summary
        .steps
        .iter()
        .all(|s| s.status == StepStatus::Upcoming));
}

#[test]
fn test_invalid_saved_inputs_do_not_build() {
    let inputs = BakeInputs {
        cold_proof: true,
        cold_proof_hours: None,
        ..BakeInputs::default()
    };
    let err = inputs.validate().unwrap_err();
    assert!(err.is_invalid_config());
    assert_eq!(err.field(), Some("cold_proof_hours"));
}
