//! Bake inputs and the validated bake configuration

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::trace;

use super::options::{BakeVessel, FlourType, RoomTemp, StarterType};
use crate::error::{ErrorCode, PlannerError, Result};

/// Allowed bulk fermentation duration in hours
pub const BULK_HOURS_RANGE: RangeInclusive<f64> = 3.0..=6.0;
/// Allowed cold proof duration in hours
pub const COLD_PROOF_HOURS_RANGE: RangeInclusive<u32> = 6..=24;
/// Allowed hydration percentage
pub const HYDRATION_RANGE: RangeInclusive<u32> = 60..=85;
/// Allowed flour weight in grams
pub const FLOUR_WEIGHT_RANGE: RangeInclusive<u32> = 250..=700;

pub const DEFAULT_START_TIME: &str = "14:00";
pub const DEFAULT_COLD_PROOF_HOURS: u32 = 10;
pub const DEFAULT_HYDRATION_PCT: u32 = 70;
pub const DEFAULT_FLOUR_WEIGHT_G: u32 = 500;

/// Raw bake inputs as entered by the baker and persisted between runs
///
/// Nothing here is trusted: [`BakeInputs::validate`] is the only way to turn a
/// record into a [`BakeConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakeInputs {
    pub start_time: String,
    pub cold_proof: bool,
    #[serde(default)]
    pub flour_type: FlourType,
    #[serde(default)]
    pub bake_vessel: BakeVessel,
    #[serde(default)]
    pub starter_type: StarterType,
    #[serde(default)]
    pub room_temp: RoomTemp,
    /// Explicit bulk fermentation hours; the room temperature default applies when absent
    #[serde(default)]
    pub bulk_override: Option<f64>,
    #[serde(default)]
    pub cold_proof_hours: Option<u32>,
    #[serde(default = "default_hydration")]
    pub hydration_pct: u32,
    #[serde(default = "default_flour_weight")]
    pub flour_weight_g: u32,
}

fn default_hydration() -> u32 {
    DEFAULT_HYDRATION_PCT
}

fn default_flour_weight() -> u32 {
    DEFAULT_FLOUR_WEIGHT_G
}

impl Default for BakeInputs {
    fn default() -> Self {
        Self {
            start_time: DEFAULT_START_TIME.to_string(),
            cold_proof: true,
            flour_type: FlourType::default(),
            bake_vessel: BakeVessel::default(),
            starter_type: StarterType::default(),
            room_temp: RoomTemp::default(),
            bulk_override: None,
            cold_proof_hours: Some(DEFAULT_COLD_PROOF_HOURS),
            hydration_pct: DEFAULT_HYDRATION_PCT,
            flour_weight_g: DEFAULT_FLOUR_WEIGHT_G,
        }
    }
}

impl BakeInputs {
    /// Validate the raw inputs into an immutable bake configuration
    pub fn validate(&self) -> Result<BakeConfig> {
        let start_time = parse_start_time(&self.start_time)?;
        let bulk_ferment_hours = self
            .bulk_override
            .unwrap_or_else(|| self.room_temp.default_bulk_hours());

        // Hours left over from an earlier cold-proof bake are ignored.
        let cold_proof_hours = if self.cold_proof {
            self.cold_proof_hours
        } else {
            if self.cold_proof_hours.is_some() {
                trace!("Dropping cold_proof_hours for a room temperature proof");
            }
            None
        };

        let config = BakeConfig {
            start_time,
            cold_proof: self.cold_proof,
            flour_type: self.flour_type,
            bake_vessel: self.bake_vessel,
            starter_type: self.starter_type,
            room_temp: self.room_temp,
            bulk_ferment_hours,
            cold_proof_hours,
            hydration_pct: self.hydration_pct,
            flour_weight_g: self.flour_weight_g,
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<&BakeConfig> for BakeInputs {
    fn from(config: &BakeConfig) -> Self {
        Self {
            start_time: config.start_time.format("%H:%M").to_string(),
            cold_proof: config.cold_proof,
            flour_type: config.flour_type,
            bake_vessel: config.bake_vessel,
            starter_type: config.starter_type,
            room_temp: config.room_temp,
            bulk_override: Some(config.bulk_ferment_hours),
            cold_proof_hours: config.cold_proof_hours,
            hydration_pct: config.hydration_pct,
            flour_weight_g: config.flour_weight_g,
        }
    }
}

/// A validated bake configuration
///
/// Every numeric field lies within its declared range and `cold_proof_hours`
/// is present exactly when `cold_proof` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BakeConfig {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub cold_proof: bool,
    pub flour_type: FlourType,
    pub bake_vessel: BakeVessel,
    pub starter_type: StarterType,
    pub room_temp: RoomTemp,
    pub bulk_ferment_hours: f64,
    pub cold_proof_hours: Option<u32>,
    pub hydration_pct: u32,
    pub flour_weight_g: u32,
}

impl BakeConfig {
    /// Check every field against its domain
    pub fn validate(&self) -> Result<()> {
        if !self.bulk_ferment_hours.is_finite()
            || !BULK_HOURS_RANGE.contains(&self.bulk_ferment_hours)
        {
            return Err(out_of_range(
                "bulk_ferment_hours",
                self.bulk_ferment_hours,
                &BULK_HOURS_RANGE,
            ));
        }

        match (self.cold_proof, self.cold_proof_hours) {
            (true, None) => {
                return Err(PlannerError::invalid_config_with_code(
                    ErrorCode::BAKE_MISSING_FIELD,
                    "cold_proof_hours",
                    "required when cold proofing",
                ))
            }
            (false, Some(_)) => {
                return Err(PlannerError::invalid_config_with_code(
                    ErrorCode::BAKE_INCONSISTENT,
                    "cold_proof_hours",
                    "only allowed when cold proofing",
                ))
            }
            (true, Some(hours)) if !COLD_PROOF_HOURS_RANGE.contains(&hours) => {
                return Err(out_of_range(
                    "cold_proof_hours",
                    hours,
                    &COLD_PROOF_HOURS_RANGE,
                ))
            }
            _ => {}
        }

        if !HYDRATION_RANGE.contains(&self.hydration_pct) {
            return Err(out_of_range(
                "hydration_pct",
                self.hydration_pct,
                &HYDRATION_RANGE,
            ));
        }

        if !FLOUR_WEIGHT_RANGE.contains(&self.flour_weight_g) {
            return Err(out_of_range(
                "flour_weight_g",
                self.flour_weight_g,
                &FLOUR_WEIGHT_RANGE,
            ));
        }

        Ok(())
    }

    /// Serialize the configuration as context for the troubleshooting prompt
    pub fn to_context_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn out_of_range<T: std::fmt::Display + PartialOrd>(
    field: &str,
    value: T,
    range: &RangeInclusive<T>,
) -> PlannerError {
    PlannerError::invalid_config_with_code(
        ErrorCode::BAKE_OUT_OF_RANGE,
        field,
        format!(
            "{} is outside {}..={}",
            value,
            range.start(),
            range.end()
        ),
    )
}

/// Parse a time of day given as `HH:MM` or `HH:MM:SS`
pub fn parse_start_time(raw: &str) -> Result<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S%.f"))
        .map_err(|_| {
            PlannerError::invalid_config_with_code(
                ErrorCode::BAKE_OUT_OF_RANGE,
                "start_time",
                format!("'{}' is not a time of day (expected HH:MM)", raw),
            )
        })
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }
}
