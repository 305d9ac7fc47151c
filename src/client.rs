//! HTTP client for the calitask storage API

use anyhow::{Context, Result};
use calitask_core::NewTodo;
use serde::{Deserialize, Serialize};

/// HTTP client for the storage API
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

// Response types matching server API

#[derive(Debug, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
}

#[derive(Serialize)]
pub struct CreateProjectRequest<'a> {
    pub title: &'a str,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /api/projects
    pub async fn create_project(&self, title: &str) -> Result<Project> {
        let resp = self
            .http
            .post(format!("{}/api/projects", self.base_url))
            .json(&CreateProjectRequest { title })
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            anyhow::bail!("{}", error_message(resp).await);
        }

        Ok(resp.json().await?)
    }

    /// POST /api/todo
    pub async fn create_todo(&self, todo: &NewTodo) -> Result<()> {
        let resp = self
            .http
            .post(format!("{}/api/todo", self.base_url))
            .json(todo)
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            anyhow::bail!("{}", error_message(resp).await);
        }

        Ok(())
    }
}

/// The server answers errors with a plain-text body.
async fn error_message(resp: reqwest::Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    match body.trim() {
        "" => format!("Server responded with {}", status),
        text => format!("Server responded with {}: {}", status, text),
    }
}
