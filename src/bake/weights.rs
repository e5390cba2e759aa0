//! Ingredient weights derived from flour weight and hydration

use serde::Serialize;

use super::config::BakeConfig;

/// Starter as a fraction of flour weight
pub const STARTER_RATIO: f64 = 0.20;
/// Salt as a fraction of flour weight
pub const SALT_RATIO: f64 = 0.02;

/// Grams of each ingredient for one loaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DoughWeights {
    pub flour_g: u32,
    pub water_g: u32,
    pub starter_g: u32,
    pub salt_g: u32,
}

impl DoughWeights {
    /// Compute weights for a flour weight and hydration percentage
    pub fn compute(flour_weight_g: u32, hydration_pct: u32) -> Self {
        let flour = f64::from(flour_weight_g);
        Self {
            flour_g: flour_weight_g,
            water_g: round_grams(flour * f64::from(hydration_pct) / 100.0),
            starter_g: round_grams(flour * STARTER_RATIO),
            salt_g: round_grams(flour * SALT_RATIO),
        }
    }

    /// Total dough weight
    pub fn total_g(&self) -> u32 {
        self.flour_g + self.water_g + self.starter_g + self.salt_g
    }
}

impl From<&BakeConfig> for DoughWeights {
    fn from(config: &BakeConfig) -> Self {
        Self::compute(config.flour_weight_g, config.hydration_pct)
    }
}

fn round_grams(grams: f64) -> u32 {
    grams.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_loaf() {
        let weights = DoughWeights::compute(500, 70);
        assert_eq!(weights.water_g, 350);
        assert_eq!(weights.starter_g, 100);
        assert_eq!(weights.salt_g, 10);
        assert_eq!(weights.total_g(), 960);
    }

    #[test]
    fn test_rounding_is_half_up() {
        // 275 * 0.02 = 5.5
        let weights = DoughWeights::compute(275, 65);
        assert_eq!(weights.salt_g, 6);
        assert_eq!(weights.starter_g, 55);
        // 275 * 65 / 100 = 178.75
        assert_eq!(weights.water_g, 179);
    }
}
