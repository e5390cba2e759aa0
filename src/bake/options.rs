//! Enumerated bake preferences
//!
//! These choices are display-only, with the exception of [`RoomTemp`] which
//! supplies the default bulk fermentation duration. Each option serializes as
//! its human-readable label so saved inputs stay readable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorCode, PlannerError};

/// Common behaviour for the fixed option lists shown to the baker
pub trait BakeOption: Copy + Sized + 'static {
    /// Field name used in error messages
    const FIELD: &'static str;

    /// Every choice, in the order it is offered
    fn all() -> &'static [Self];

    /// Human-readable label
    fn label(&self) -> &'static str;
}

/// Parse a label case-insensitively, also accepting kebab-case aliases
/// such as `strong-white` for `Strong White`.
fn parse_option<T: BakeOption>(input: &str) -> Result<T, PlannerError> {
    let wanted = normalize(input);
    T::all()
        .iter()
        .copied()
        .find(|option| normalize(option.label()) == wanted)
        .ok_or_else(|| {
            let choices: Vec<&str> = T::all().iter().map(|o| o.label()).collect();
            PlannerError::invalid_config_with_code(
                ErrorCode::BAKE_UNKNOWN_OPTION,
                T::FIELD,
                format!("'{}' is not one of: {}", input, choices.join(", ")),
            )
        })
}

fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FlourType {
    #[default]
    #[serde(rename = "Strong White")]
    StrongWhite,
    #[serde(rename = "Whole Wheat")]
    WholeWheat,
    #[serde(rename = "50/50 White & Whole Wheat")]
    HalfAndHalf,
    #[serde(rename = "Rye")]
    Rye,
    #[serde(rename = "Other")]
    Other,
}

impl BakeOption for FlourType {
    const FIELD: &'static str = "flour_type";

    fn all() -> &'static [Self] {
        &[
            Self::StrongWhite,
            Self::WholeWheat,
            Self::HalfAndHalf,
            Self::Rye,
            Self::Other,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::StrongWhite => "Strong White",
            Self::WholeWheat => "Whole Wheat",
            Self::HalfAndHalf => "50/50 White & Whole Wheat",
            Self::Rye => "Rye",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BakeVessel {
    #[default]
    #[serde(rename = "Dutch Oven")]
    DutchOven,
    #[serde(rename = "Loaf Tin")]
    LoafTin,
    #[serde(rename = "Baking Tray with Steam")]
    TrayWithSteam,
    #[serde(rename = "Other")]
    Other,
}

impl BakeOption for BakeVessel {
    const FIELD: &'static str = "bake_vessel";

    fn all() -> &'static [Self] {
        &[
            Self::DutchOven,
            Self::LoafTin,
            Self::TrayWithSteam,
            Self::Other,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::DutchOven => "Dutch Oven",
            Self::LoafTin => "Loaf Tin",
            Self::TrayWithSteam => "Baking Tray with Steam",
            Self::Other => "Other",
        }
    }
}

impl BakeVessel {
    /// Phrase used in the preheat step
    pub fn preheat_phrase(&self) -> &'static str {
        match self {
            Self::DutchOven => "Dutch oven",
            Self::LoafTin => "loaf tin",
            Self::TrayWithSteam => "baking tray and a tray of water for steam",
            Self::Other => "baking vessel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StarterType {
    #[default]
    #[serde(rename = "White Starter")]
    White,
    #[serde(rename = "Rye Starter")]
    Rye,
    #[serde(rename = "Whole Wheat Starter")]
    WholeWheat,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl BakeOption for StarterType {
    const FIELD: &'static str = "starter_type";

    fn all() -> &'static [Self] {
        &[Self::White, Self::Rye, Self::WholeWheat, Self::Unknown]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::White => "White Starter",
            Self::Rye => "Rye Starter",
            Self::WholeWheat => "Whole Wheat Starter",
            Self::Unknown => "Unknown",
        }
    }
}

/// Fermentation temperature band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoomTemp {
    #[serde(rename = "Cold (<20°C)")]
    Cold,
    #[default]
    #[serde(rename = "Moderate (20–24°C)")]
    Moderate,
    #[serde(rename = "Warm (>24°C)")]
    Warm,
}

impl BakeOption for RoomTemp {
    const FIELD: &'static str = "room_temp";

    fn all() -> &'static [Self] {
        &[Self::Cold, Self::Moderate, Self::Warm]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Cold => "Cold (<20°C)",
            Self::Moderate => "Moderate (20–24°C)",
            Self::Warm => "Warm (>24°C)",
        }
    }
}

impl RoomTemp {
    /// Bulk fermentation duration suggested for this temperature band
    pub fn default_bulk_hours(&self) -> f64 {
        match self {
            Self::Cold => 5.0,
            Self::Moderate => 4.0,
            Self::Warm => 3.5,
        }
    }
}

impl FromStr for RoomTemp {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Short names are easier to type than the full band labels.
        match s.trim().to_lowercase().as_str() {
            "cold" => Ok(Self::Cold),
            "moderate" => Ok(Self::Moderate),
            "warm" => Ok(Self::Warm),
            _ => parse_option(s),
        }
    }
}

impl FromStr for FlourType {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "white" => Ok(Self::StrongWhite),
            "50/50" | "half" => Ok(Self::HalfAndHalf),
            _ => parse_option(s),
        }
    }
}

impl FromStr for BakeVessel {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tray" => Ok(Self::TrayWithSteam),
            _ => parse_option(s),
        }
    }
}

impl FromStr for StarterType {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "white" => Ok(Self::White),
            "rye" => Ok(Self::Rye),
            "whole-wheat" | "wholewheat" => Ok(Self::WholeWheat),
            _ => parse_option(s),
        }
    }
}

macro_rules! display_as_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_as_label!(FlourType, BakeVessel, StarterType, RoomTemp);
