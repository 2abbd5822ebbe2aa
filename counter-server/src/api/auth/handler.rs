//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::ServerState;
use crate::utils::ValidJson;

/// Fixed delay before answering a failed login
const AUTH_FAILURE_DELAY_MS: u64 = 200;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub admin_id: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
}

/// Compare through digests so the comparison time does not depend on where
/// the inputs first differ
fn same_secret(given: &str, expected: &str) -> bool {
    Sha256::digest(given.as_bytes()) == Sha256::digest(expected.as_bytes())
}

/// Login handler
///
/// 200 `{success: true}` or 401 `{success: false}`; nothing else is revealed.
pub async fn login(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> (StatusCode, Json<LoginResponse>) {
    let id_ok = same_secret(req.admin_id.as_deref().unwrap_or_default(), &state.config.admin_id);
    let password_ok = same_secret(
        req.admin_password.as_deref().unwrap_or_default(),
        &state.config.admin_password,
    );

    if id_ok && password_ok {
        tracing::info!("Admin login succeeded");
        return (StatusCode::OK, Json(LoginResponse { success: true }));
    }

    tracing::warn!("Admin login failed");
    tokio::time::sleep(Duration::from_millis(AUTH_FAILURE_DELAY_MS)).await;
    (StatusCode::UNAUTHORIZED, Json(LoginResponse { success: false }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_secret() {
        assert!(same_secret("jjj", "jjj"));
        assert!(!same_secret("jjj", "jj"));
        assert!(!same_secret("", "x"));
    }

    #[test]
    fn test_login_request_field_names() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"adminId":"a","adminPassword":"b"}"#).unwrap();
        assert_eq!(req.admin_id.as_deref(), Some("a"));
        assert_eq!(req.admin_password.as_deref(), Some("b"));

        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(req.admin_id.is_none());
    }
}
