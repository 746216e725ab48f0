use anyhow::{anyhow, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use crate::app::state::AppState;

async fn build_headers(state: &AppState) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );

    // Session token, attached once login has happened
    if let Some(token) = state.token().await {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))?,
        );
    }

    Ok(headers)
}

fn url_for(state: &AppState, path: &str) -> String {
    format!("{}{}", state.config.api_base_url, path)
}

/// The backend wraps every payload in `{ success, code, message, data }`.
/// Endpoints that return bare payloads carry neither marker field and pass
/// through untouched.
pub fn check_envelope(resp_json: &Value) -> Result<()> {
    let success = resp_json.get("success").and_then(|v| v.as_bool());
    let code = resp_json.get("code").and_then(|v| v.as_u64());

    let ok = match (success, code) {
        (None, None) => true,
        (success, code) => success.unwrap_or(false) || code.map(|c| c == 200).unwrap_or(false),
    };

    if !ok {
        let message = resp_json
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("no message");
        return Err(anyhow!("Backend rejected the request: {message}"));
    }
    Ok(())
}

/// Payload under the envelope's `data` key, or the body itself for bare
/// responses.
pub fn extract_data(mut resp_json: Value) -> Value {
    match resp_json.get_mut("data") {
        Some(data) => data.take(),
        None => resp_json,
    }
}

async fn handle_response(resp: reqwest::Response, url: &str) -> Result<Value> {
    let status = resp.status();
    debug!("{} -> {}", url, status);

    let resp_json: Value = resp.json().await?;
    debug!(
        "response body: {}",
        serde_json::to_string_pretty(&resp_json).unwrap_or_default()
    );

    if !status.is_success() {
        let error_msg = serde_json::to_string(&resp_json).unwrap_or_default();
        return Err(anyhow!("Request to {url} failed with {status}: {error_msg}"));
    }

    check_envelope(&resp_json)?;
    Ok(extract_data(resp_json))
}

pub async fn get_json(state: &AppState, path: &str) -> Result<Value> {
    let url = url_for(state, path);
    let headers = build_headers(state).await?;
    let resp = state.http.get(&url).headers(headers).send().await?;
    handle_response(resp, &url).await
}

pub async fn post_json(state: &AppState, path: &str, payload: &Value) -> Result<Value> {
    let url = url_for(state, path);
    let headers = build_headers(state).await?;
    let resp = state
        .http
        .post(&url)
        .headers(headers)
        .json(payload)
        .send()
        .await?;
    handle_response(resp, &url).await
}

pub async fn put_json(state: &AppState, path: &str, payload: &Value) -> Result<Value> {
    let url = url_for(state, path);
    let headers = build_headers(state).await?;
    let resp = state
        .http
        .put(&url)
        .headers(headers)
        .json(payload)
        .send()
        .await?;
    handle_response(resp, &url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_accepts_success_flag_or_code() {
        assert!(check_envelope(&json!({"success": true, "data": {}})).is_ok());
        assert!(check_envelope(&json!({"code": 200, "data": {}})).is_ok());
        assert!(check_envelope(&json!({"items": []})).is_ok());
    }

    #[test]
    fn test_envelope_rejects_failures() {
        let err = check_envelope(&json!({"success": false, "message": "duplicate name"}))
            .unwrap_err();
        assert!(err.to_string().contains("duplicate name"));
        assert!(check_envelope(&json!({"code": 403})).is_err());
    }

    #[test]
    fn test_extract_data() {
        let wrapped = json!({"success": true, "data": {"id": "c-1"}});
        assert_eq!(extract_data(wrapped), json!({"id": "c-1"}));

        let bare = json!([1, 2, 3]);
        assert_eq!(extract_data(bare.clone()), bare);
    }
}
