use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::api::reports::{trigger_report_cards, wait_for_report};
use crate::app::state::AppState;
use crate::app::types::{SyncOutcome, SyncStats};

/// End-of-term run: fire a report-card job per class and watch each one
/// until it settles.
pub async fn generate_class_reports(
    state: &AppState,
    class_ids: &[String],
    term: &str,
    concurrency: usize,
) -> SyncStats {
    info!(
        "Triggering report cards for {} classes (term {term})",
        class_ids.len()
    );

    stream::iter(class_ids.iter().cloned().map(|class_id| {
        let state = state.clone();
        let term = term.to_string();
        async move {
            let result = async {
                let job = trigger_report_cards(&state, &class_id, &term).await?;
                wait_for_report(&state, &job.job_id).await
            }
            .await;
            (class_id, result)
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .fold(SyncStats::default(), |mut stats, (class_id, result)| async move {
        match result {
            Ok(_) => stats.add(&SyncOutcome::Applied),
            Err(e) => {
                warn!("Report cards for class {class_id} failed: {e}");
                stats.add(&SyncOutcome::Failed);
            }
        }
        stats
    })
    .await
}
