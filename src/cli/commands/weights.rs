//! Weights command implementation

use anyhow::Result;

use crate::bake::{BakeInputs, DoughWeights};
use crate::cli::render::render_weights;

/// Print ingredient weights for a flour weight and hydration
pub async fn run_weights_command(flour_weight: u32, hydration: u32) -> Result<()> {
    let weights = weights_for(flour_weight, hydration)?;
    print!("{}", render_weights(&weights));
    Ok(())
}

/// Range-checked weights
pub fn weights_for(flour_weight: u32, hydration: u32) -> crate::error::Result<DoughWeights> {
    let config = BakeInputs {
        flour_weight_g: flour_weight,
        hydration_pct: hydration,
        ..BakeInputs::default()
    }
    .validate()?;
    Ok(DoughWeights::from(&config))
}
