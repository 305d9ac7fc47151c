use anyhow::Result;
use calitask_core::{CalitaskConfig, ImportOptions, plan_import};
use chrono::Utc;
use log::{error, info};
use owo_colors::OwoColorize;

use super::print_rejected;
use crate::client::Client;
use crate::source::FeedSource;

#[derive(Debug, Default, PartialEq)]
pub struct ImportStats {
    pub created: usize,
    pub failed: usize,
    pub skipped: usize,
}

pub async fn run(
    config: &CalitaskConfig,
    source: &FeedSource,
    project: Option<String>,
) -> Result<()> {
    let feed = source.read().await?;
    let now = Utc::now();

    let options = ImportOptions::from_config(config, config.default_project_id);
    let mut plan = plan_import(&feed, now, &options);

    if plan.is_empty() {
        info!("No upcoming events found in {}", source);
        print_rejected(&plan);
        return Ok(());
    }

    let client = Client::new(&config.api_url);
    let title = project.unwrap_or_else(|| source.project_title());
    let project_id = resolve_project(&client, &title, config.default_project_id).await;
    plan.assign_project(project_id);

    info!(
        "Importing {} events from {} into project {} at {}",
        plan.todos.len(),
        source,
        project_id,
        client.base_url()
    );

    let mut stats = ImportStats {
        skipped: plan.dropped + plan.rejected.len(),
        ..Default::default()
    };

    for todo in &plan.todos {
        match client.create_todo(todo).await {
            Ok(()) => {
                println!("   {} {}", "+".green(), todo.title);
                stats.created += 1;
            }
            Err(e) => {
                error!("Failed to create todo for event '{}': {:#}", todo.title, e);
                println!("   {} {}", "x".red(), todo.title.red());
                stats.failed += 1;
            }
        }
    }

    print_rejected(&plan);

    println!(
        "\nImported {} created, {} failed, {} skipped",
        stats.created, stats.failed, stats.skipped
    );

    Ok(())
}

/// Create the target project, falling back to `default_id` when that fails.
async fn resolve_project(client: &Client, title: &str, default_id: i64) -> i64 {
    match client.create_project(title).await {
        Ok(project) => {
            info!("Created project '{}' ({})", project.title, project.id);
            project.id
        }
        Err(e) => {
            error!(
                "Project creation failed, falling back to project {}: {:#}",
                default_id, e
            );
            default_id
        }
    }
}
