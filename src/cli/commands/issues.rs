//! Issues command implementation

use anyhow::Result;

use crate::advisor::Stage;
use crate::cli::render::render_issues;

/// List stages and their common issues
pub async fn run_issues_command(stage: Option<String>) -> Result<()> {
    let stages = match stage {
        Some(raw) => vec![raw.parse::<Stage>()?],
        None => Stage::ALL.to_vec(),
    };
    print!("{}", render_issues(&stages));
    Ok(())
}
