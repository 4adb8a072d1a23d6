//! Export of generated posts to flat formats (CSV, plain text, JSON).

use std::str::FromStr;

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::post::GeneratedPost;
use crate::store::Store;

pub mod handlers;

const TXT_RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Txt,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "txt" => Ok(ExportFormat::Txt),
            "json" => Ok(ExportFormat::Json),
            other => Err(AppError::Validation(format!(
                "Unsupported export format '{other}'. Valid formats: csv, txt, json"
            ))),
        }
    }
}

/// Rendered export, returned to the client as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ExportFile {
    pub content: String,
    pub filename: String,
}

/// Fetches the requested posts and renders them.
///
/// Unknown ids are skipped; if none match, the export is `NotFound`.
pub async fn export_posts(
    store: &dyn Store,
    format: ExportFormat,
    post_ids: &[String],
) -> Result<ExportFile, AppError> {
    let posts = store.find_generated_posts(post_ids).await?;
    if posts.is_empty() {
        return Err(AppError::NotFound("No posts found".to_string()));
    }

    let content = render(format, &posts)?;
    info!(
        "Exported {} of {} requested post(s) as {}",
        posts.len(),
        post_ids.len(),
        format.extension()
    );

    Ok(ExportFile {
        content,
        filename: format!("posts.{}", format.extension()),
    })
}

pub fn render(format: ExportFormat, posts: &[GeneratedPost]) -> Result<String, AppError> {
    match format {
        ExportFormat::Csv => Ok(render_csv(posts)),
        ExportFormat::Txt => Ok(render_txt(posts)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(posts)
            .context("Failed to serialize posts for export")?),
    }
}

/// One row per platform content: Platform,Content,Hashtags,Created At.
fn render_csv(posts: &[GeneratedPost]) -> String {
    let mut csv = String::from("Platform,Content,Hashtags,Created At\n");
    for post in posts {
        let created_at = post.created_at.to_rfc3339();
        for content in &post.post_contents {
            let hashtags = content
                .hashtags
                .as_ref()
                .map(|tags| tags.join(","))
                .unwrap_or_default();
            let row = [
                content.platform.as_str(),
                content.content.as_str(),
                hashtags.as_str(),
                created_at.as_str(),
            ]
            .map(csv_field)
            .join(",");
            csv.push_str(&row);
            csv.push('\n');
        }
    }
    csv
}

/// Quotes a CSV field, doubling embedded quotes.
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn render_txt(posts: &[GeneratedPost]) -> String {
    let rule = "=".repeat(TXT_RULE_WIDTH);
    let mut txt = String::new();
    for post in posts {
        txt.push_str(&format!("Generated at: {}\n", post.created_at.to_rfc3339()));
        txt.push_str(&format!("Variant: {}\n", post.variant_number));
        txt.push_str(&rule);
        txt.push('\n');
        for content in &post.post_contents {
            txt.push_str(&format!("\n{}:\n", content.platform.label()));
            txt.push_str(&content.content);
            txt.push('\n');
            if let Some(tags) = content.hashtags.as_ref().filter(|t| !t.is_empty()) {
                txt.push_str(&format!("Hashtags: {}\n", tags.join(" ")));
            }
        }
        txt.push('\n');
        txt.push_str(&rule);
        txt.push_str("\n\n");
    }
    txt
}
