use anyhow::{anyhow, Result};
use serde_json::json;
use tracing::{info, warn};

use super::http::post_json;
use crate::app::models::UserProfile;
use crate::app::state::AppState;
use crate::app::validate::{check_password_strength, require};

/// Sign in and remember the bearer token for every later call.
pub async fn login(state: &AppState, username: &str, password: &str) -> Result<UserProfile> {
    require("username", username)?;
    require("password", password)?;

    let payload = json!({
        "username": username,
        "password": password,
    });

    let data = post_json(state, "/api/auth/login", &payload).await?;

    let token = data
        .get("token")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("Login response carried no token"))?
        .to_string();

    let user: UserProfile = serde_json::from_value(
        data.get("user")
            .cloned()
            .ok_or_else(|| anyhow!("Login response carried no user profile"))?,
    )?;

    let mut session = state.session.write().await;
    session.token = Some(token);
    session.user = Some(user.clone());

    info!("Signed in as {} ({})", user.username, user.role);
    Ok(user)
}

/// Change the signed-in user's password. Strength is enforced client-side
/// before the request goes out, matching the form behavior.
pub async fn change_password(state: &AppState, current: &str, new: &str) -> Result<()> {
    require("current password", current)?;
    check_password_strength(new)?;

    let payload = json!({
        "currentPassword": current,
        "newPassword": new,
    });

    post_json(state, "/api/auth/change-password", &payload).await?;
    info!("Password changed");
    Ok(())
}

/// Drop the session. The backend call is best effort; the local token is
/// cleared either way.
pub async fn logout(state: &AppState) -> Result<()> {
    if let Err(e) = post_json(state, "/api/auth/logout", &json!({})).await {
        warn!("Backend logout failed: {e}");
    }
    state.session.write().await.clear();
    info!("Session cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::logger;

    #[tokio::test]
    async fn test_login_rejects_blank_credentials() {
        logger::init_test();
        let state = AppState::new().await.expect("state");
        assert!(login(&state, "", "Passw0rd").await.is_err());
        assert!(login(&state, "head.teacher", " ").await.is_err());
    }

    #[tokio::test]
    async fn test_change_password_enforces_strength_before_sending() {
        let state = AppState::new().await.expect("state");
        // Weak passwords never reach the network layer.
        let err = change_password(&state, "OldPass1", "weak").await.unwrap_err();
        assert!(err.to_string().contains("at least 8 characters"));
    }
}
