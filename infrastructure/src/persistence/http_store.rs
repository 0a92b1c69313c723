//! HTTP implementation of the run store port

use async_trait::async_trait;
use duet_application::{
    NewMessage, PersistenceError, RunId, RunPatch, RunStore, RunSummary, StoredRun,
};
use duet_domain::RunExport;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Address the run-history service listens on by default.
pub const DEFAULT_RUN_STORE_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Deserialize)]
struct CreatedRun {
    id: RunId,
}

#[derive(Debug, Deserialize)]
struct RunList {
    #[serde(default)]
    runs: Vec<RunSummary>,
}

#[derive(Debug, Deserialize)]
struct RunEnvelope {
    run: StoredRun,
}

/// Run store backed by the run-history service's JSON API
#[derive(Debug, Clone)]
pub struct HttpRunStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRunStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn runs_url(&self, suffix: &str) -> String {
        format!("{}/api/runs{}", self.base_url, suffix)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, PersistenceError> {
        let response = request
            .send()
            .await
            .map_err(|e| PersistenceError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(PersistenceError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, PersistenceError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| PersistenceError::Unreachable(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| PersistenceError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl RunStore for HttpRunStore {
    async fn start_run(&self, run: &RunExport) -> Result<RunId, PersistenceError> {
        let response = self
            .send(self.client.post(self.runs_url("/start")).json(run))
            .await?;
        let created: CreatedRun = read_json(response).await?;
        debug!("Run history id {}", created.id);
        Ok(created.id)
    }

    async fn append_message(
        &self,
        id: RunId,
        message: &NewMessage,
    ) -> Result<(), PersistenceError> {
        self.send(
            self.client
                .post(self.runs_url(&format!("/{}/messages", id)))
                .json(message),
        )
        .await?;
        Ok(())
    }

    async fn patch_run(&self, id: RunId, patch: &RunPatch) -> Result<(), PersistenceError> {
        self.send(
            self.client
                .patch(self.runs_url(&format!("/{}", id)))
                .json(patch),
        )
        .await?;
        Ok(())
    }

    async fn list_runs(&self) -> Result<Vec<RunSummary>, PersistenceError> {
        let response = self.send(self.client.get(self.runs_url(""))).await?;
        let list: RunList = read_json(response).await?;
        Ok(list.runs)
    }

    async fn get_run(&self, id: RunId) -> Result<StoredRun, PersistenceError> {
        let response = self
            .send(self.client.get(self.runs_url(&format!("/{}", id))))
            .await
            .map_err(|e| match e {
                PersistenceError::Rejected { status, .. }
                    if status == StatusCode::NOT_FOUND.as_u16() =>
                {
                    PersistenceError::NotFound(id)
                }
                other => other,
            })?;
        let envelope: RunEnvelope = read_json(response).await?;
        Ok(envelope.run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let store = HttpRunStore::new("http://127.0.0.1:8080/");
        assert_eq!(store.base_url(), DEFAULT_RUN_STORE_URL);
        assert_eq!(store.runs_url(""), "http://127.0.0.1:8080/api/runs");
        assert_eq!(
            store.runs_url("/7/messages"),
            "http://127.0.0.1:8080/api/runs/7/messages"
        );
    }

    #[test]
    fn test_envelopes_parse() {
        let created: CreatedRun = serde_json::from_str(r#"{"id": 12}"#).unwrap();
        assert_eq!(created.id, 12);

        let list: RunList = serde_json::from_str(
            r#"{"runs":[{"id":3,"createdAt":"2026-10-17T09:00:00+00:00",
                "exportedAt":"2026-10-17T09:05:00.000Z","theme":"Remote work",
                "interactionMode":"debate","totalTurns":4,"completed":true}]}"#,
        )
        .unwrap();
        assert_eq!(list.runs.len(), 1);
        assert_eq!(list.runs[0].theme, "Remote work");
        assert!(list.runs[0].completed);

        let empty: RunList = serde_json::from_str("{}").unwrap();
        assert!(empty.runs.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let store = HttpRunStore::new("http://127.0.0.1:9");
        let err = store.list_runs().await.unwrap_err();
        assert!(matches!(err, PersistenceError::Unreachable(_)));
    }
}
