use anyhow::{bail, Result};
use serde_json::json;
use tracing::info;

use super::http::{get_json, post_json};
use crate::app::models::FeeRecord;
use crate::app::state::AppState;

pub async fn list_fee_records(
    state: &AppState,
    class_id: &str,
    term: &str,
) -> Result<Vec<FeeRecord>> {
    let path = format!(
        "/api/fees?classId={}&term={}",
        urlencoding::encode(class_id),
        urlencoding::encode(term)
    );
    let data = get_json(state, &path).await?;
    Ok(serde_json::from_value(data)?)
}

pub async fn record_payment(
    state: &AppState,
    student_id: &str,
    term: &str,
    amount: i64,
) -> Result<()> {
    if amount <= 0 {
        bail!("Payment amount must be positive, got {amount}");
    }

    let payload = json!({
        "studentId": student_id,
        "term": term,
        "amount": amount,
    });
    post_json(state, "/api/fees/payments", &payload).await?;

    info!("Recorded payment of {amount} for student {student_id} (term {term})");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_payment_amount_must_be_positive() {
        let state = AppState::new().await.expect("state");
        assert!(record_payment(&state, "stu-1", "1", 0).await.is_err());
        assert!(record_payment(&state, "stu-1", "1", -5_000).await.is_err());
    }
}
