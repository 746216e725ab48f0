use anyhow::{anyhow, Result};
use serde_json::json;
use tracing::{info, warn};

use super::http::{get_json, post_json};
use crate::app::models::{ReportJob, ReportStatus};
use crate::app::state::AppState;

/// Kick off report-card generation for a class and term. Rendering happens
/// on the backend; all we get back is a job to watch.
pub async fn trigger_report_cards(
    state: &AppState,
    class_id: &str,
    term: &str,
) -> Result<ReportJob> {
    let payload = json!({
        "classId": class_id,
        "term": term,
    });
    let data = post_json(state, "/api/reports/generate", &payload).await?;
    let job: ReportJob = serde_json::from_value(data)?;

    info!("Report-card job {} started for class {class_id}", job.job_id);
    Ok(job)
}

pub async fn report_status(state: &AppState, job_id: &str) -> Result<ReportJob> {
    let path = format!("/api/reports/status/{}", urlencoding::encode(job_id));
    let data = get_json(state, &path).await?;
    Ok(serde_json::from_value(data)?)
}

/// Poll the job on a fixed interval until it settles. Pending/processing
/// states count as retryable; a failed job is a hard error.
pub async fn wait_for_report(state: &AppState, job_id: &str) -> Result<ReportJob> {
    let strategy =
        tokio_retry::strategy::FixedInterval::from_millis(state.config.delay_ms).take(10);

    let action = || async {
        let job = report_status(state, job_id).await.map_err(|e| {
            warn!("Status check for job {job_id} failed: {e}");
            "status check failed"
        })?;
        match job.status {
            ReportStatus::Ready | ReportStatus::Failed => Ok(job),
            ReportStatus::Pending | ReportStatus::Processing => Err("still running"),
        }
    };

    let job = tokio_retry::Retry::spawn(strategy, action)
        .await
        .map_err(|e| anyhow!("Report job {job_id} did not settle: {e:?}"))?;

    if job.status == ReportStatus::Failed {
        return Err(anyhow!("Report job {job_id} failed on the backend"));
    }

    info!("Report job {job_id} is ready");
    Ok(job)
}
