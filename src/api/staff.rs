use anyhow::Result;
use serde_json::json;
use tracing::info;

use super::http::{get_json, post_json, put_json};
use crate::app::models::{StaffMember, UserProfile};
use crate::app::state::AppState;
use crate::app::validate::check_password_strength;

pub async fn create_staff(state: &AppState, staff: &StaffMember) -> Result<StaffMember> {
    staff.validate()?;

    let payload = serde_json::to_value(staff)?;
    let data = post_json(state, "/api/staff", &payload).await?;

    info!("Created staff record for {} {}", staff.first_name, staff.last_name);
    Ok(serde_json::from_value(data)?)
}

pub async fn list_staff(state: &AppState) -> Result<Vec<StaffMember>> {
    let data = get_json(state, "/api/staff").await?;
    Ok(serde_json::from_value(data)?)
}

/// Provision a login for an existing staff record. The temporary password
/// obeys the same policy as the change-password form.
pub async fn create_user_account(
    state: &AppState,
    staff_id: &str,
    role: &str,
    temporary_password: &str,
) -> Result<UserProfile> {
    check_password_strength(temporary_password)?;

    let payload = json!({
        "staffId": staff_id,
        "role": role,
        "password": temporary_password,
    });
    let data = post_json(state, "/api/users", &payload).await?;

    info!("Provisioned a {role} account for staff {staff_id}");
    Ok(serde_json::from_value(data)?)
}

pub async fn deactivate_user(state: &AppState, user_id: &str) -> Result<()> {
    put_json(
        state,
        &format!("/api/users/{user_id}/deactivate"),
        &json!({}),
    )
    .await?;
    info!("Deactivated user {user_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_staff_validates_contact_details() {
        let state = AppState::new().await.expect("state");
        let staff = StaffMember {
            id: None,
            first_name: "Ruth".to_string(),
            last_name: "Adong".to_string(),
            email: "not-an-email".to_string(),
            phone: "0752000111".to_string(),
            designation: "bursar".to_string(),
            subjects: vec![],
        };
        assert!(create_staff(&state, &staff).await.is_err());
    }

    #[tokio::test]
    async fn test_user_account_needs_a_strong_temporary_password() {
        let state = AppState::new().await.expect("state");
        let err = create_user_account(&state, "staff-1", "teacher", "weak")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("at least 8 characters"));
    }
}
