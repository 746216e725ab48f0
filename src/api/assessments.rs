use anyhow::{bail, Result};
use serde_json::json;
use tracing::info;

use super::http::{get_json, post_json};
use crate::app::models::AssessmentScore;
use crate::app::state::AppState;

/// Marks are entered on a 0..=100 scale.
pub fn validate_scores(scores: &[AssessmentScore]) -> Result<()> {
    for score in scores {
        if !(0.0..=100.0).contains(&score.score) {
            bail!(
                "Score {} for student {} is outside 0-100",
                score.score,
                score.student_id
            );
        }
    }
    Ok(())
}

pub async fn submit_scores(state: &AppState, scores: &[AssessmentScore]) -> Result<usize> {
    if scores.is_empty() {
        return Ok(0);
    }
    validate_scores(scores)?;

    let payload = json!({ "scores": scores });
    post_json(state, "/api/assessments/scores", &payload).await?;

    info!("Submitted {} scores", scores.len());
    Ok(scores.len())
}

pub async fn list_scores(
    state: &AppState,
    class_id: &str,
    subject_id: &str,
    term: &str,
) -> Result<Vec<AssessmentScore>> {
    let path = format!(
        "/api/assessments/scores?classId={}&subjectId={}&term={}",
        urlencoding::encode(class_id),
        urlencoding::encode(subject_id),
        urlencoding::encode(term)
    );
    let data = get_json(state, &path).await?;
    Ok(serde_json::from_value(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(value: f64) -> AssessmentScore {
        AssessmentScore {
            student_id: "stu-1".to_string(),
            subject_id: "sub-1".to_string(),
            term: "1".to_string(),
            score: value,
        }
    }

    #[test]
    fn test_scores_must_be_in_range() {
        assert!(validate_scores(&[score(0.0), score(55.5), score(100.0)]).is_ok());
        assert!(validate_scores(&[score(101.0)]).is_err());
        assert!(validate_scores(&[score(-1.0)]).is_err());
    }
}
