use anyhow::{anyhow, bail, Result};
use serde_json::{json, Value};
use tracing::info;

use super::http::{get_json, post_json};
use crate::app::models::SchoolClass;
use crate::app::state::AppState;
use crate::app::taxonomy::class_name::class_name;
use crate::app::taxonomy::Rank;

pub async fn list_classes(state: &AppState) -> Result<Vec<SchoolClass>> {
    let data = get_json(state, "/api/classes").await?;
    Ok(serde_json::from_value(data)?)
}

/// Strict boundary for the class form: parse the rank once and enforce the
/// stream rule before anything reaches the wire.
pub fn validate_new_class(rank: &str, stream: Option<&str>) -> Result<(Rank, Option<String>)> {
    let parsed = Rank::parse(rank).ok_or_else(|| anyhow!("Unrecognized class rank: '{rank}'"))?;

    let stream = stream
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    if parsed.requires_stream() && stream.is_none() {
        bail!(
            "{} is an A-Level class and must carry a stream (Sciences or Arts)",
            parsed.code()
        );
    }

    Ok((parsed, stream))
}

pub fn build_create_payload(
    rank: Rank,
    stream: Option<&str>,
    class_teacher_id: Option<&str>,
) -> Value {
    json!({
        "rank": rank.code(),
        "stream": stream,
        "name": class_name(rank, stream),
        "classTeacherId": class_teacher_id,
    })
}

/// Ask the backend whether a derived class name is already taken, before
/// the create request is attempted.
pub async fn check_class_name_exist(
    state: &AppState,
    name: &str,
    class_id: Option<&str>,
) -> Result<bool> {
    let encoded_name = urlencoding::encode(name);
    let path = format!(
        "/api/classes/check-name?name={}&classId={}",
        encoded_name,
        class_id.unwrap_or("")
    );

    let data = get_json(state, &path).await?;

    let exists = data
        .get("exists")
        .and_then(|v| v.as_bool())
        .ok_or_else(|| anyhow!("Malformed name-check response"))?;

    if exists {
        info!("Class name '{name}' is already taken");
    } else {
        info!("Class name '{name}' is available");
    }

    Ok(exists)
}

pub async fn create_class(
    state: &AppState,
    rank: &str,
    stream: Option<&str>,
    class_teacher_id: Option<&str>,
) -> Result<SchoolClass> {
    let (parsed, stream) = validate_new_class(rank, stream)?;
    let name = class_name(parsed, stream.as_deref());

    if check_class_name_exist(state, &name, None).await? {
        bail!("A class named '{name}' already exists");
    }

    let payload = build_create_payload(parsed, stream.as_deref(), class_teacher_id);
    let data = post_json(state, "/api/classes", &payload).await?;

    info!("Created class '{name}'");
    Ok(serde_json::from_value(data)?)
}

pub async fn promote_class(
    state: &AppState,
    class_id: &str,
    target_rank: Rank,
    target_stream: Option<&str>,
) -> Result<()> {
    let payload = json!({
        "targetRank": target_rank.code(),
        "targetStream": target_stream,
        "targetName": class_name(target_rank, target_stream),
    });
    post_json(state, &format!("/api/classes/{class_id}/promote"), &payload).await?;
    Ok(())
}

/// S6 classes leave the progression instead of moving up.
pub async fn graduate_class(state: &AppState, class_id: &str) -> Result<()> {
    post_json(state, &format!("/api/classes/{class_id}/graduate"), &json!({})).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_new_class_accepts_o_level_without_stream() {
        let (rank, stream) = validate_new_class("S1", None).unwrap();
        assert_eq!(rank, Rank::S1);
        assert_eq!(stream, None);

        let (rank, stream) = validate_new_class("s3", Some("B")).unwrap();
        assert_eq!(rank, Rank::S3);
        assert_eq!(stream.as_deref(), Some("B"));
    }

    #[test]
    fn test_validate_new_class_requires_a_level_stream() {
        assert!(validate_new_class("S5", None).is_err());
        assert!(validate_new_class("S6", Some("  ")).is_err());
        let (rank, stream) = validate_new_class("S5", Some("Sciences")).unwrap();
        assert_eq!(rank, Rank::S5);
        assert_eq!(stream.as_deref(), Some("Sciences"));
    }

    #[test]
    fn test_validate_new_class_rejects_unknown_rank() {
        assert!(validate_new_class("P7", None).is_err());
        assert!(validate_new_class("", None).is_err());
    }

    #[test]
    fn test_create_payload_carries_derived_name() {
        let payload = build_create_payload(Rank::S5, Some("Arts"), Some("staff-9"));
        assert_eq!(payload["name"], "S.5 Arts");
        assert_eq!(payload["rank"], "S5");
        assert_eq!(payload["classTeacherId"], "staff-9");

        let payload = build_create_payload(Rank::S2, None, None);
        assert_eq!(payload["name"], "S.2");
        assert_eq!(payload["stream"], Value::Null);
    }
}
