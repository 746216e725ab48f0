use anyhow::{bail, Result};
use serde_json::json;
use tracing::{info, warn};

use super::http::{get_json, post_json};
use crate::app::models::Subject;
use crate::app::state::AppState;
use crate::app::taxonomy::subjects::find_subject_code;
use crate::app::validate::require;

pub async fn list_subjects(state: &AppState) -> Result<Vec<Subject>> {
    let data = get_json(state, "/api/subjects").await?;
    Ok(serde_json::from_value(data)?)
}

/// Create a subject, filling the curriculum code from the static catalog
/// when the form left it blank.
pub async fn create_subject(state: &AppState, name: &str, code: Option<&str>) -> Result<Subject> {
    require("subject name", name)?;

    let code = match code.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => code.to_string(),
        None => match find_subject_code(name) {
            Some(code) => code.to_string(),
            None => {
                warn!("No catalog code for subject '{name}'");
                bail!("Subject '{name}' is not in the catalog; provide a code explicitly");
            }
        },
    };

    let payload = json!({
        "name": name,
        "code": code,
    });
    let data = post_json(state, "/api/subjects", &payload).await?;

    info!("Created subject {name} ({code})");
    Ok(serde_json::from_value(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_subject_needs_name_or_known_catalog_entry() {
        let state = AppState::new().await.expect("state");
        assert!(create_subject(&state, "", None).await.is_err());
        // Unknown subject with no explicit code stops before the network.
        assert!(create_subject(&state, "Basket Weaving", None).await.is_err());
    }
}
