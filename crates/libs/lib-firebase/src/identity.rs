//! # Identity Toolkit Client
//!
//! Firebase Authentication user management over the Identity Toolkit v1 REST API:
//!
//! - `GET  /v1/projects/{project}/accounts:batchGet?maxResults=1000`
//! - `POST /v1/projects/{project}/accounts:delete` with `{"localId": uid}`

use crate::http::{check_status, decode_error, transport_error};
use async_trait::async_trait;
use lib_core::{IdentityService, Principal, PrincipalPage, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest page the listing endpoint returns.
pub const MAX_LIST_RESULTS: u32 = 1000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetResponse {
    #[serde(default)]
    users: Vec<UserInfo>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserInfo {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

impl From<UserInfo> for Principal {
    fn from(user: UserInfo) -> Self {
        Principal {
            uid: user.local_id,
            email: user.email,
            display_name: user.display_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteAccountRequest<'a> {
    local_id: &'a str,
}

/// HTTP client for Firebase Authentication user management.
#[derive(Clone)]
pub struct IdentityToolkitClient {
    http: Client,
    base_url: String,
    project_id: String,
    bearer_token: String,
}

impl IdentityToolkitClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            bearer_token: bearer_token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn accounts_url(&self, action: &str) -> String {
        format!(
            "{}/v1/projects/{}/accounts:{}",
            self.base_url, self.project_id, action
        )
    }
}

#[async_trait]
impl IdentityService for IdentityToolkitClient {
    async fn list_principals(&self) -> Result<PrincipalPage> {
        let url = self.accounts_url("batchGet");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(&[("maxResults", MAX_LIST_RESULTS)])
            .send()
            .await
            .map_err(|e| transport_error("User listing", e))?;

        let page: BatchGetResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| decode_error("User listing", e))?;

        debug!(
            users = page.users.len(),
            truncated = page.next_page_token.is_some(),
            "Fetched user page"
        );

        Ok(PrincipalPage {
            principals: page.users.into_iter().map(Principal::from).collect(),
            next_page_token: page.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn delete_principal(&self, uid: &str) -> Result<()> {
        let url = self.accounts_url("delete");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.bearer_token)
            .json(&DeleteAccountRequest { local_id: uid })
            .send()
            .await
            .map_err(|e| transport_error("User deletion", e))?;

        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server;
    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use lib_core::{purge_all_users, AppError};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    const PROJECT: &str = "demo-project";

    #[derive(Clone, Default)]
    struct MockAuth {
        deleted: Arc<Mutex<Vec<String>>>,
    }

    async fn batch_get(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
        if bearer != Some("Bearer test-token") {
            let body = json!({"error": {"message": "UNAUTHENTICATED"}});
            return (StatusCode::UNAUTHORIZED, Json(body));
        }
        assert_eq!(params.get("maxResults").map(String::as_str), Some("1000"));
        (
            StatusCode::OK,
            Json(json!({
                "users": [
                    {"localId": "u1", "email": "a@x.com", "emailVerified": true},
                    {"localId": "u2", "email": "b@x.com", "displayName": "Bea"},
                    {"localId": "u3", "phoneNumber": "+15555550100"}
                ]
            })),
        )
    }

    async fn delete(State(state): State<MockAuth>, Json(body): Json<Value>) -> impl IntoResponse {
        let uid = body["localId"].as_str().unwrap_or_default().to_string();
        if uid == "u3" {
            let body = json!({
                "error": {"code": 400, "message": "USER_NOT_FOUND", "status": "INVALID_ARGUMENT"}
            });
            return (StatusCode::BAD_REQUEST, Json(body));
        }
        state.deleted.lock().unwrap().push(uid);
        (StatusCode::OK, Json(json!({"kind": "identitytoolkit#DeleteAccountResponse"})))
    }

    async fn spawn_mock() -> (String, MockAuth) {
        let state = MockAuth::default();
        let router = Router::new()
            .route(&format!("/v1/projects/{}/accounts:batchGet", PROJECT), get(batch_get))
            .route(&format!("/v1/projects/{}/accounts:delete", PROJECT), post(delete))
            .with_state(state.clone());
        (test_server::spawn(router).await, state)
    }

    #[tokio::test]
    async fn test_list_principals() {
        let (base, _) = spawn_mock().await;
        let client = IdentityToolkitClient::new(Client::new(), base, PROJECT, "test-token");

        let page = client.list_principals().await.expect("listing should succeed");

        assert!(!page.is_truncated());
        assert_eq!(page.principals.len(), 3);
        assert_eq!(page.principals[0], Principal::new("u1", Some("a@x.com")));
        assert_eq!(page.principals[1].display_name.as_deref(), Some("Bea"));
        assert_eq!(page.principals[2].email, None);
    }

    #[tokio::test]
    async fn test_list_principals_unauthorized() {
        let (base, _) = spawn_mock().await;
        let client = IdentityToolkitClient::new(Client::new(), base, PROJECT, "wrong-token");

        let err = client.list_principals().await.unwrap_err();

        assert!(matches!(err, AppError::Provider(ref m) if m.contains("HTTP 401")));
    }

    #[tokio::test]
    async fn test_delete_principal() {
        let (base, state) = spawn_mock().await;
        let client = IdentityToolkitClient::new(Client::new(), base, PROJECT, "test-token");

        client.delete_principal("u1").await.expect("delete should succeed");
        let err = client.delete_principal("u3").await.unwrap_err();

        assert_eq!(*state.deleted.lock().unwrap(), vec!["u1".to_string()]);
        assert!(matches!(err, AppError::Provider(ref m) if m.contains("USER_NOT_FOUND")));
    }

    #[tokio::test]
    async fn test_purge_over_http_reports_failed_user() {
        let (base, state) = spawn_mock().await;
        let client = IdentityToolkitClient::new(Client::new(), base, PROJECT, "test-token");

        let err = purge_all_users(&client).await.unwrap_err();

        match err {
            AppError::Deletion { uid, failed, total, .. } => {
                assert_eq!(uid, "u3");
                assert_eq!((failed, total), (1, 3));
            }
            other => panic!("expected deletion error, got {:?}", other),
        }
        let mut deleted = state.deleted.lock().unwrap().clone();
        deleted.sort();
        assert_eq!(deleted, vec!["u1".to_string(), "u2".to_string()]);
    }

    #[test]
    fn test_next_page_token_decoding() {
        let page: BatchGetResponse =
            serde_json::from_str(r#"{"users":[{"localId":"u1"}],"nextPageToken":"abc"}"#).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));

        let empty: BatchGetResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.users.is_empty());
    }
}
