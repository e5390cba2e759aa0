//! Timeline builder
//!
//! Maps a [`BakeConfig`] and the calendar day the bake starts on to an ordered
//! list of timestamped steps. All offsets are fixed and measured from the
//! start time `T0`:
//!
//! ```text
//! T0 ── 60m ──> autolyse end ── bulk ──> bulk end ── 30m ──> shaped
//!                 │ fold #1, #2, #3 every bulk/3
//! cold:  shaped ── cold proof ──> preheat ── 45m ──> bake ── 45m ──> cool ── 90m ──> eat
//! room:  shaped ── 3h ──> proof end (bake), preheat 45m before it
//! ```

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use super::step::{Step, StepKind};
use crate::bake::{BakeConfig, DoughWeights};
use crate::error::{ErrorCode, PlannerError, Result};

pub const AUTOLYSE_MINUTES: i64 = 60;
pub const SHAPING_MINUTES: i64 = 30;
pub const ROOM_PROOF_HOURS: i64 = 3;
pub const PREHEAT_MINUTES: i64 = 45;
pub const BAKE_MINUTES: i64 = 45;
pub const COOL_MINUTES: i64 = 90;
pub const FOLD_COUNT: u8 = 3;

/// Key instants of a bake, before they are turned into labelled steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestones {
    pub start: NaiveDateTime,
    pub autolyse_end: NaiveDateTime,
    pub folds: Vec<NaiveDateTime>,
    pub bulk_end: NaiveDateTime,
    pub shape_end: NaiveDateTime,
    pub proof_end: NaiveDateTime,
    pub preheat: NaiveDateTime,
    pub bake: NaiveDateTime,
    pub cool: NaiveDateTime,
    pub eat: NaiveDateTime,
}

impl Milestones {
    /// Compute milestones for a configuration starting at `t0`
    pub fn compute(config: &BakeConfig, t0: NaiveDateTime) -> Result<Self> {
        config.validate()?;

        let bulk = hours(config.bulk_ferment_hours);
        let fold_interval_minutes = config.bulk_ferment_hours * 60.0 / f64::from(FOLD_COUNT);

        let autolyse_end = add(t0, Duration::minutes(AUTOLYSE_MINUTES))?;
        let bulk_end = add(autolyse_end, bulk)?;
        // The first fold lands on the end of autolyse.
        let folds = (0..FOLD_COUNT)
            .map(|i| add(autolyse_end, minutes(f64::from(i) * fold_interval_minutes)))
            .collect::<Result<Vec<_>>>()?;
        let shape_end = add(bulk_end, Duration::minutes(SHAPING_MINUTES))?;

        let (proof_end, preheat, bake) = match config.cold_proof_hours {
            Some(cold_hours) if config.cold_proof => {
                let proof_end = add(shape_end, Duration::hours(i64::from(cold_hours)))?;
                let preheat = proof_end;
                let bake = add(preheat, Duration::minutes(PREHEAT_MINUTES))?;
                (proof_end, preheat, bake)
            }
            _ => {
                let proof_end = add(shape_end, Duration::hours(ROOM_PROOF_HOURS))?;
                let preheat = add(proof_end, -Duration::minutes(PREHEAT_MINUTES))?;
                (proof_end, preheat, proof_end)
            }
        };

        let cool = add(bake, Duration::minutes(BAKE_MINUTES))?;
        let eat = add(cool, Duration::minutes(COOL_MINUTES))?;

        Ok(Self {
            start: t0,
            autolyse_end,
            folds,
            bulk_end,
            shape_end,
            proof_end,
            preheat,
            bake,
            cool,
            eat,
        })
    }
}

/// An ordered bake schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    steps: Vec<Step>,
    milestones: Milestones,
    weights: DoughWeights,
}

impl Timeline {
    /// Steps in chronological order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn milestones(&self) -> &Milestones {
        &self.milestones
    }

    pub fn weights(&self) -> DoughWeights {
        self.weights
    }

    /// When the first step happens
    pub fn starts_at(&self) -> NaiveDateTime {
        self.milestones.start
    }

    /// When the last step happens
    pub fn ends_at(&self) -> NaiveDateTime {
        self.milestones.eat
    }
}

/// Build the bake timeline for `config`, starting on `day`
pub fn build_timeline(config: &BakeConfig, day: NaiveDate) -> Result<Timeline> {
    build_timeline_at(config, day.and_time(config.start_time))
}

/// Build the bake timeline anchored at an explicit start instant
pub fn build_timeline_at(config: &BakeConfig, t0: NaiveDateTime) -> Result<Timeline> {
    let milestones = Milestones::compute(config, t0)?;
    let weights = DoughWeights::from(config);

    let mut steps = Vec::with_capacity(13);
    steps.push(Step::new(
        milestones.start,
        StepKind::Autolyse,
        format!(
            "Mix {}g {} flour & {}g water (Autolyse)",
            weights.flour_g, config.flour_type, weights.water_g
        ),
    ));
    steps.push(Step::new(
        milestones.autolyse_end,
        StepKind::StartBulk,
        format!(
            "Add {}g starter and {}g salt, begin bulk fermentation",
            weights.starter_g, weights.salt_g
        ),
    ));
    for (n, fold) in (1..).zip(&milestones.folds) {
        steps.push(Step::new(
            *fold,
            StepKind::Fold(n),
            format!("Stretch & fold #{}", n),
        ));
    }
    steps.push(Step::new(
        milestones.bulk_end,
        StepKind::EndBulk,
        "End of bulk fermentation",
    ));
    steps.push(Step::new(
        milestones.shape_end,
        StepKind::Shape,
        "Shape the dough",
    ));

    match config.cold_proof_hours {
        Some(cold_hours) if config.cold_proof => {
            steps.push(Step::new(
                milestones.shape_end,
                StepKind::ColdProof,
                format!("Place in fridge for {}h cold proof", cold_hours),
            ));
            steps.push(Step::new(
                milestones.proof_end,
                StepKind::NextDay,
                "Next Day",
            ));
        }
        _ => {
            steps.push(Step::new(
                milestones.shape_end,
                StepKind::RoomProof,
                format!("Start room temp proof (~{} hrs)", ROOM_PROOF_HOURS),
            ));
        }
    }

    steps.push(Step::new(
        milestones.preheat,
        StepKind::Preheat,
        format!(
            "Preheat oven to 250°C with the {} inside",
            config.bake_vessel.preheat_phrase()
        ),
    ));
    steps.push(Step::new(
        milestones.bake,
        StepKind::Bake,
        "Score and bake: 20 mins with lid, 20–25 mins without",
    ));
    steps.push(Step::new(
        milestones.cool,
        StepKind::Cool,
        "Remove from oven and leave to cool for at least an hour",
    ));
    steps.push(Step::new(milestones.eat, StepKind::Eat, "Eat and enjoy!"));

    debug!(
        steps = steps.len(),
        start = %milestones.start,
        eat = %milestones.eat,
        cold_proof = config.cold_proof,
        "Built bake timeline"
    );

    Ok(Timeline {
        steps,
        milestones,
        weights,
    })
}

fn hours(hours: f64) -> Duration {
    Duration::seconds((hours * 3600.0).round() as i64)
}

fn minutes(minutes: f64) -> Duration {
    Duration::seconds((minutes * 60.0).round() as i64)
}

fn add(at: NaiveDateTime, offset: Duration) -> Result<NaiveDateTime> {
    at.checked_add_signed(offset).ok_or_else(|| {
        PlannerError::invalid_config_with_code(
            ErrorCode::BAKE_TIME_OVERFLOW,
            "start_time",
            format!("{} + {} is out of range", at, offset),
        )
    })
}
