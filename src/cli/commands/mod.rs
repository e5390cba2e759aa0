//! Command implementation modules
//!
//! Each command lives in its own module. Shared plumbing (session access,
//! the current instant, printing a bake) is kept on [`CommandContext`].

pub mod issues;
pub mod plan;
pub mod reset;
pub mod show;
pub mod troubleshoot;
pub mod weights;

pub use issues::run_issues_command;
pub use plan::run_plan_command;
pub use reset::run_reset_command;
pub use show::run_show_command;
pub use troubleshoot::run_troubleshoot_command;
pub use weights::run_weights_command;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::bake::{BakeConfig, DoughWeights};
use crate::cli::render;
use crate::clock::{self, ManualClock, SystemClock, TimeSource};
use crate::config::PlannerConfig;
use crate::error::{ErrorCode, PlannerError};
use crate::session::{validate_session_name, BakeSession, FileStore};
use crate::timeline::{build_timeline, progress, Progress};

/// Configuration and helpers shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: PlannerConfig,
}

impl CommandContext {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Apply `--session` and `--state-dir`
    pub fn with_overrides(
        mut self,
        session: Option<String>,
        state_dir: Option<PathBuf>,
    ) -> crate::error::Result<Self> {
        if let Some(session) = session {
            validate_session_name(&session)?;
            self.config.session = session;
        }
        if let Some(dir) = state_dir {
            self.config.state_dir = Some(dir);
        }
        Ok(self)
    }

    /// Open the configured session
    pub fn open_session(&self) -> crate::error::Result<BakeSession<FileStore>> {
        let dir = self.config.effective_state_dir();
        debug!("Opening session '{}' in {}", self.config.session, dir.display());
        let store = FileStore::open(&dir, &self.config.session).map_err(PlannerError::from)?;
        Ok(BakeSession::new(store).with_max_age(self.config.bake_max_age))
    }

    /// The validated configuration of the saved bake, if there is a usable one
    pub fn active_bake(&self) -> crate::error::Result<Option<BakeConfig>> {
        let Some(saved) = self.open_session()?.load()? else {
            return Ok(None);
        };
        match saved.inputs.validate() {
            Ok(config) => Ok(Some(config)),
            Err(e) => {
                warn!("Saved bake is not usable: {}", e);
                Ok(None)
            }
        }
    }

    /// Read the current instant from `--now` or the system clock
    ///
    /// `--now none` stands for a clock with no reading.
    pub fn current_instant(
        &self,
        now: Option<&str>,
    ) -> crate::error::Result<Option<DateTime<FixedOffset>>> {
        let mut source: Box<dyn TimeSource> = match now {
            Some(raw) if raw.trim().eq_ignore_ascii_case("none") => {
                Box::new(ManualClock::unavailable())
            }
            Some(raw) => Box::new(ManualClock::from_iso(raw)?),
            None => Box::new(SystemClock::new()),
        };
        source.refresh();
        Ok(source.last_known())
    }

    /// Today in the bake's time zone
    pub fn today(&self, now: Option<DateTime<FixedOffset>>) -> NaiveDate {
        let instant = now.unwrap_or_else(|| DateTime::<FixedOffset>::from(Utc::now()));
        clock::calendar_day(instant, self.config.zone())
    }

    /// Build the schedule for a bake and annotate it against `now`
    pub fn schedule(
        &self,
        config: &BakeConfig,
        day: NaiveDate,
        now: Option<DateTime<FixedOffset>>,
    ) -> crate::error::Result<Progress> {
        let timeline = build_timeline(config, day)?;
        let wall_now = now.map(|instant| clock::wall_clock(instant, self.config.zone()));
        Ok(progress(timeline.steps(), wall_now))
    }

    /// Print a bake as text or JSON
    pub fn present_bake(
        &self,
        config: &BakeConfig,
        day: NaiveDate,
        now: Option<DateTime<FixedOffset>>,
        json: bool,
    ) -> Result<()> {
        let progress = self.schedule(config, day, now)?;
        let weights = DoughWeights::from(config);

        if json {
            let view = BakeView {
                started_on: day,
                config,
                weights,
                progress: &progress,
            };
            let json = serde_json::to_string_pretty(&view).context("Failed to serialize schedule")?;
            println!("{}", json);
        } else {
            print!("{}", render::render_bake(&progress, config, &weights));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct BakeView<'a> {
    started_on: NaiveDate,
    config: &'a BakeConfig,
    weights: DoughWeights,
    progress: &'a Progress,
}

/// Parse a `YYYY-MM-DD` day
pub fn parse_day(raw: &str) -> crate::error::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        PlannerError::validation_with_code(
            ErrorCode::VALIDATION_INVALID_TIME,
            format!("'{}' is not a date (YYYY-MM-DD): {}", raw, e),
            Some("date".to_string()),
        )
    })
}
