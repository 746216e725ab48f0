use anyhow::Result;
use serde_json::Value;
use tracing::info;

use super::http::{get_json, post_json};
use crate::app::models::Student;
use crate::app::state::AppState;

/// Register one student. Validation runs client-side first so a bad form
/// never costs a round trip.
pub async fn register_student(state: &AppState, student: &Student) -> Result<Student> {
    student.validate()?;

    let payload = serde_json::to_value(student)?;
    let data = post_json(state, "/api/students", &payload).await?;

    info!("Registered student {}", student.full_name());
    Ok(serde_json::from_value(data)?)
}

pub async fn list_students(state: &AppState, class_id: &str) -> Result<Vec<Student>> {
    let path = format!("/api/students?classId={}", urlencoding::encode(class_id));
    let data = get_json(state, &path).await?;
    Ok(serde_json::from_value(data)?)
}

pub async fn search_students(state: &AppState, name: &str) -> Result<Vec<Student>> {
    let path = format!("/api/students/search?name={}", urlencoding::encode(name));
    let data = get_json(state, &path).await?;
    Ok(serde_json::from_value(data)?)
}

/// Duplicate check keyed on full name and class, mirroring the backend's
/// registration guard.
pub async fn check_student_exists(state: &AppState, student: &Student) -> Result<bool> {
    let path = format!(
        "/api/students/check?name={}&classId={}",
        urlencoding::encode(&student.full_name()),
        urlencoding::encode(&student.class_id)
    );
    let data = get_json(state, &path).await?;
    Ok(data
        .get("exists")
        .and_then(Value::as_bool)
        .unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_student() -> Student {
        Student {
            id: None,
            first_name: "Brian".to_string(),
            last_name: "Ssempala".to_string(),
            gender: "M".to_string(),
            date_of_birth: None,
            guardian_name: "Grace Ssempala".to_string(),
            guardian_phone: "0772123456".to_string(),
            guardian_email: None,
            class_id: "cls-s1".to_string(),
            year_of_entry: "2026".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_student_before_network() {
        let state = AppState::new().await.expect("state");
        let mut student = sample_student();
        student.guardian_phone = "bad".to_string();
        assert!(register_student(&state, &student).await.is_err());
    }

    #[test]
    fn test_search_paths_are_encoded() {
        let encoded = urlencoding::encode("Okello J");
        assert_eq!(encoded, "Okello%20J");
    }
}
