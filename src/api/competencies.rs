use anyhow::Result;
use serde_json::{json, Value};
use tracing::info;

use super::http::{get_json, post_json};
use crate::app::models::Competency;
use crate::app::state::AppState;

pub async fn list_competencies(
    state: &AppState,
    subject_id: &str,
    term: &str,
) -> Result<Vec<Competency>> {
    let path = format!(
        "/api/competencies?subjectId={}&term={}",
        urlencoding::encode(subject_id),
        urlencoding::encode(term)
    );
    let data = get_json(state, &path).await?;
    Ok(serde_json::from_value(data)?)
}

pub async fn create_competency(state: &AppState, competency: &Competency) -> Result<Competency> {
    let payload = serde_json::to_value(competency)?;
    let data = post_json(state, "/api/competencies", &payload).await?;
    Ok(serde_json::from_value(data)?)
}

/// One request for a whole cloned term's worth of competencies.
pub async fn create_competencies_bulk(
    state: &AppState,
    competencies: &[Competency],
) -> Result<usize> {
    if competencies.is_empty() {
        return Ok(0);
    }

    let payload = json!({ "items": competencies });
    let data = post_json(state, "/api/competencies/bulk", &payload).await?;

    let created = data
        .get("created")
        .and_then(Value::as_u64)
        .unwrap_or(competencies.len() as u64) as usize;

    info!("Bulk-created {created} competencies");
    Ok(created)
}
