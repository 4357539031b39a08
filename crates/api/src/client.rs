use std::env;

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use shot_core::model::{Plan, Session};

use crate::records::{PlanRecord, SessionRecord};
use crate::source::{FetchError, SessionDataSource};
use async_trait::async_trait;

/// Connection settings for the session/plan collaborator.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
        }
    }

    /// Read connection settings from `SHOTTRAK_API_URL` / `SHOTTRAK_API_TOKEN`.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("SHOTTRAK_API_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        let token = env::var("SHOTTRAK_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        Some(Self { base_url, token })
    }
}

/// HTTP-backed data source for the remote collaborator.
///
/// Individual records that fail domain validation are skipped with a warning
/// rather than poisoning the whole snapshot; a payload that does not decode
/// at all is a `FetchError::Decode`.
#[derive(Clone)]
pub struct HttpSessionSource {
    client: Client,
    config: ApiConfig,
}

#[derive(Debug, Deserialize)]
struct SessionsResponse {
    sessions: Vec<SessionRecord>,
}

#[derive(Debug, Deserialize)]
struct PlansResponse {
    plans: Vec<PlanRecord>,
}

impl HttpSessionSource {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, FetchError> {
        let mut request = self.client.get(self.endpoint(path));
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SessionDataSource for HttpSessionSource {
    async fn fetch_sessions(&self) -> Result<Vec<Session>, FetchError> {
        let body: SessionsResponse = self.get_json("api/sessions").await?;
        let mut sessions = Vec::with_capacity(body.sessions.len());
        for record in body.sessions {
            let id = record.id;
            match record.into_session() {
                Ok(session) => sessions.push(session),
                Err(err) => warn!(session_id = id, %err, "skipping corrupt session record"),
            }
        }
        Ok(sessions)
    }

    async fn fetch_plans(&self) -> Result<Vec<Plan>, FetchError> {
        let body: PlansResponse = self.get_json("api/plans").await?;
        let mut plans = Vec::with_capacity(body.plans.len());
        for record in body.plans {
            let id = record.id;
            match record.into_plan() {
                Ok(plan) => plans.push(plan),
                Err(err) => warn!(plan_id = id, %err, "skipping corrupt plan record"),
            }
        }
        Ok(plans)
    }
}
