//! Plain and JSON output.

use anyhow::Result;
use ripple_core::BuildPlan;

/// Prints workspace names, one per line. An empty plan prints nothing.
pub fn print_plain(plan: &BuildPlan) {
    for name in plan.names() {
        println!("{}", name);
    }
}

/// Prints workspace names as a JSON array.
pub fn print_json(plan: &BuildPlan) -> Result<()> {
    println!("{}", serde_json::to_string(&plan.names())?);
    Ok(())
}

/// Prints the full workspace records as a JSON array.
pub fn print_info(plan: &BuildPlan) -> Result<()> {
    println!("{}", serde_json::to_string(plan)?);
    Ok(())
}
