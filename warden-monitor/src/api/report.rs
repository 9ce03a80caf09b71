//! Report API Handler
//!
//! Serves the last persisted report as preformatted HTML.

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::service::ReportStore;

/// GET /saida
/// Returns the current report wrapped in `<pre>`, or 404 before the first
/// report has been written
pub async fn get_report(State(store): State<Arc<ReportStore>>) -> ApiResult<Html<String>> {
    tracing::debug!("Serving report from {}", store.path().display());

    let report = store
        .read()
        .await?
        .ok_or_else(|| ApiError::NotFound("report not found".to_string()))?;

    Ok(Html(format!("<pre>{}</pre>", escape_html(&report))))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
