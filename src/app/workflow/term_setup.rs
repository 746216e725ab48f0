use anyhow::{bail, Result};
use tracing::info;

use crate::api::competencies::{create_competencies_bulk, list_competencies};
use crate::app::models::Competency;
use crate::app::state::AppState;

/// Copy a competency list onto another term: ids are dropped so the backend
/// mints fresh ones, and every record is restamped with the target term.
pub fn clone_for_term(competencies: &[Competency], target_term: &str) -> Vec<Competency> {
    competencies
        .iter()
        .map(|c| Competency {
            id: None,
            subject_id: c.subject_id.clone(),
            term: target_term.to_string(),
            code: c.code.clone(),
            description: c.description.clone(),
        })
        .collect()
}

/// Term rollover for one subject: pull the source term's competencies and
/// bulk-create them under the target term.
pub async fn clone_term_competencies(
    state: &AppState,
    subject_id: &str,
    from_term: &str,
    to_term: &str,
) -> Result<usize> {
    if from_term == to_term {
        bail!("Source and target term are both '{from_term}'");
    }

    let source = list_competencies(state, subject_id, from_term).await?;
    if source.is_empty() {
        info!("Subject {subject_id} has no competencies in term {from_term}, nothing to clone");
        return Ok(0);
    }

    let cloned = clone_for_term(&source, to_term);
    let created = create_competencies_bulk(state, &cloned).await?;

    info!(
        "Cloned {created} competencies for subject {subject_id}: term {from_term} -> {to_term}"
    );
    Ok(created)
}
