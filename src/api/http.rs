//! reqwest implementation of [`SignupApi`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::flow::draft::Draft;
use crate::flow::model::{Jurisdiction, Role, RoleRecordKind};
use crate::session::Session;

use super::{AccountReceipt, ExtractedDocument, PersistedRoleRecord, SavedRecord, SignupApi};

/// HTTP client against the signup backend. Authenticated calls attach a
/// bearer token resolved from the shared session.
pub struct HttpSignupApi {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    session: Arc<RwLock<Session>>,
}

impl HttpSignupApi {
    pub fn new(config: &ClientConfig, session: Arc<RwLock<Session>>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn record_path(kind: RoleRecordKind) -> &'static str {
        match kind {
            RoleRecordKind::Organization => "api/org-details",
            RoleRecordKind::Institution => "api/institution-details",
        }
    }

    async fn bearer(&self) -> Result<String, ApiError> {
        let session = self.session.read().await;
        session
            .bearer_token()
            .map(|token| token.expose_secret().to_string())
            .ok_or(ApiError::Unauthenticated)
    }
}

async fn expect_json(endpoint: &str, response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    response.json().await.map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

fn request_err(endpoint: &str, error: reqwest::Error) -> ApiError {
    ApiError::Request {
        endpoint: endpoint.to_string(),
        reason: error.to_string(),
    }
}

/// Pull a record id out of a response object. Current backends return `id`;
/// older ones returned `_id`, sometimes numeric.
fn record_id(object: &Map<String, Value>) -> Option<String> {
    ["id", "_id"].iter().find_map(|key| match object.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// The fetch endpoint returns either a single record object or an array
/// whose first element is the record. Anything else is an empty state.
fn unwrap_record(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(object) => Some(object),
        Value::Array(items) => items.into_iter().next().and_then(|v| match v {
            Value::Object(object) => Some(object),
            _ => None,
        }),
        _ => None,
    }
}

#[async_trait]
impl SignupApi for HttpSignupApi {
    async fn extract_document(
        &self,
        jurisdiction: Jurisdiction,
        capture: &Map<String, Value>,
    ) -> Result<ExtractedDocument, ApiError> {
        let endpoint = "api/documents/extract";
        let body = serde_json::json!({
            "jurisdiction": jurisdiction,
            "documents": capture,
        });
        let response = self
            .client
            .post(self.url(endpoint))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| request_err(endpoint, e))?;

        let value = expect_json(endpoint, response).await?;
        let fields = value.as_object().cloned().unwrap_or_default();
        Ok(ExtractedDocument { fields })
    }

    async fn register_account(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<AccountReceipt, ApiError> {
        let endpoint = "api/auth/register";
        let response = self
            .client
            .post(self.url(endpoint))
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| request_err(endpoint, e))?;

        let value = expect_json(endpoint, response).await?;

        // Keep whatever token the backend handed back for later calls.
        self.session.write().await.absorb(&value);

        let object = value.as_object().cloned().unwrap_or_default();
        let user_id = ["userId", "id", "_id"]
            .iter()
            .find_map(|key| match object.get(*key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
            .ok_or_else(|| ApiError::Decode {
                endpoint: endpoint.to_string(),
                reason: "registration response carried no user id".to_string(),
            })?;
        let role = object
            .get("role")
            .and_then(Value::as_str)
            .and_then(Role::from_wire);

        Ok(AccountReceipt { user_id, role })
    }

    async fn save_role_record(
        &self,
        kind: RoleRecordKind,
        user_id: &str,
        record_id_hint: Option<&str>,
        payload: &Map<String, Value>,
    ) -> Result<SavedRecord, ApiError> {
        let token = self.bearer().await?;
        let path = Self::record_path(kind);

        let mut body = payload.clone();
        body.insert("userId".to_string(), Value::String(user_id.to_string()));

        // Create when no record id is known yet, update otherwise.
        let (endpoint, builder) = match record_id_hint {
            None => (path.to_string(), self.client.post(self.url(path))),
            Some(id) => {
                let endpoint = format!("{path}/{id}");
                let builder = self.client.patch(self.url(&endpoint));
                (endpoint, builder)
            }
        };

        let response = builder
            .timeout(self.timeout)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| request_err(&endpoint, e))?;

        let value = expect_json(&endpoint, response).await?;
        let fields = value.as_object().cloned().unwrap_or_default();
        let id = record_id(&fields)
            .or_else(|| record_id_hint.map(str::to_string))
            .ok_or_else(|| ApiError::Decode {
                endpoint: endpoint.clone(),
                reason: "save response carried no record id".to_string(),
            })?;

        Ok(SavedRecord { id, fields })
    }

    async fn fetch_role_record(
        &self,
        kind: RoleRecordKind,
        user_id: &str,
    ) -> Result<Option<PersistedRoleRecord>, ApiError> {
        let token = self.bearer().await?;
        let endpoint = Self::record_path(kind);

        let response = self
            .client
            .get(self.url(endpoint))
            .timeout(self.timeout)
            .bearer_auth(&token)
            .query(&[("userId", user_id)])
            .send()
            .await
            .map_err(|e| request_err(endpoint, e))?;

        // No record is an empty state, not an error.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let value = expect_json(endpoint, response).await?;
        let Some(fields) = unwrap_record(value) else {
            return Ok(None);
        };
        let Some(id) = record_id(&fields) else {
            tracing::warn!(endpoint, "fetched record carried no id; treating as empty");
            return Ok(None);
        };

        Ok(Some(PersistedRoleRecord { id, fields }))
    }

    async fn submit_registration(&self, draft: &Draft) -> Result<(), ApiError> {
        let token = self.bearer().await?;
        let endpoint = "api/signup/submit";

        let response = self
            .client
            .post(self.url(endpoint))
            .timeout(self.timeout)
            .bearer_auth(&token)
            .json(&draft.to_payload())
            .send()
            .await
            .map_err(|e| request_err(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
