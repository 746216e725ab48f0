use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::api::students::{check_student_exists, register_student};
use crate::app::models::Student;
use crate::app::state::AppState;
use crate::app::types::{SyncOutcome, SyncStats};

/// Split a registration batch into records worth sending and records the
/// form validation already rules out.
pub fn partition_validated(students: Vec<Student>) -> (Vec<Student>, Vec<(Student, String)>) {
    let mut valid = Vec::new();
    let mut rejected = Vec::new();
    for student in students {
        match student.validate() {
            Ok(()) => valid.push(student),
            Err(e) => rejected.push((student, e.to_string())),
        }
    }
    (valid, rejected)
}

async fn register_one(state: &AppState, student: &Student) -> Result<SyncOutcome> {
    if check_student_exists(state, student).await? {
        info!("{} is already registered, skipping", student.full_name());
        return Ok(SyncOutcome::Skipped);
    }
    register_student(state, student).await?;
    Ok(SyncOutcome::Applied)
}

/// Bulk student registration: validate locally, then push the survivors
/// with bounded concurrency and tally what happened.
pub async fn register_students(
    state: &AppState,
    students: Vec<Student>,
    concurrency: usize,
) -> SyncStats {
    info!("Starting bulk registration of {} students", students.len());

    let (valid, rejected) = partition_validated(students);

    let mut stats = SyncStats::default();
    for (student, reason) in &rejected {
        warn!("Rejected {}: {}", student.full_name(), reason);
        stats.add(&SyncOutcome::Failed);
    }

    let stats = stream::iter(valid.into_iter().map(|student| {
        let state = state.clone();
        async move {
            let name = student.full_name();
            let result = register_one(&state, &student).await;
            (name, result)
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .fold(stats, |mut stats, (name, result)| async move {
        match result {
            Ok(outcome) => stats.add(&outcome),
            Err(e) => {
                warn!("Registration of '{name}' failed: {e}");
                stats.add(&SyncOutcome::Failed);
            }
        }
        stats
    })
    .await;

    info!(
        "Bulk registration done: {} registered, {} skipped, {} failed",
        stats.applied, stats.skipped, stats.failed
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::logger;

    fn student(first_name: &str, phone: &str) -> Student {
        Student {
            id: None,
            first_name: first_name.to_string(),
            last_name: "Katumba".to_string(),
            gender: "M".to_string(),
            date_of_birth: None,
            guardian_name: "Peter Katumba".to_string(),
            guardian_phone: phone.to_string(),
            guardian_email: None,
            class_id: "cls-s2".to_string(),
            year_of_entry: "2026".to_string(),
        }
    }

    #[test]
    fn test_partition_validated() {
        let batch = vec![
            student("Ivan", "0772123456"),
            student("", "0772123456"),
            student("Moses", "bad-phone"),
        ];
        let (valid, rejected) = partition_validated(batch);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].first_name, "Ivan");
        assert_eq!(rejected.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch_is_a_no_op() {
        logger::init_test();
        let state = AppState::new().await.expect("state");
        let stats = register_students(&state, Vec::new(), 4).await;
        assert_eq!(stats.total(), 0);
    }

    #[tokio::test]
    async fn test_invalid_records_fail_without_network() {
        logger::init_test();
        let state = AppState::new().await.expect("state");
        let stats = register_students(&state, vec![student("", "0772123456")], 4).await;
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.applied, 0);
    }
}
