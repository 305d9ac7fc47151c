pub mod config;
pub mod import;
pub mod normalize;
pub mod preview;

use calitask_core::ImportPlan;
use owo_colors::OwoColorize;

/// Print the events that were left out of a plan.
pub fn print_rejected(plan: &ImportPlan) {
    for rejected in &plan.rejected {
        println!(
            "   {} {} {}",
            "!".red(),
            rejected.title,
            rejected.error.to_string().dimmed()
        );
    }
}
