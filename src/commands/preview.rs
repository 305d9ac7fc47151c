use anyhow::{Context, Result};
use calitask_core::{CalitaskConfig, ImportOptions, plan_import};
use chrono::Utc;
use log::info;

use crate::source::FeedSource;

/// Print the todo payloads an import would send, as JSON on stdout.
pub async fn run(config: &CalitaskConfig, source: &FeedSource) -> Result<()> {
    let feed = source.read().await?;
    let options = ImportOptions::from_config(config, config.default_project_id);
    let plan = plan_import(&feed, Utc::now(), &options);

    info!(
        "{} todos, {} past events skipped, {} rejected",
        plan.todos.len(),
        plan.dropped,
        plan.rejected.len()
    );

    let json = serde_json::to_string_pretty(&plan.todos).context("Failed to serialize todos")?;
    println!("{}", json);

    Ok(())
}
