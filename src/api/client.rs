use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::api::models::{AskRequest, MemoryAnswer, MemorySnapshot, RoomCreated, RoomSnapshot};

/// All network and non-2xx outcomes collapse into one failure per
/// operation; the response body text is kept as the detail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },
}

/// Thin JSON client for the Parallel OS room backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: HttpClient::new(),
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(resp.json::<T>().await?)
    }

    pub async fn create_room(&self, room_name: &str) -> Result<RoomCreated, ApiError> {
        let resp = self
            .http
            .post(self.endpoint("/rooms"))
            .json(&serde_json::json!({ "room_name": room_name }))
            .send()
            .await?;
        Self::read_json(resp).await
    }

    pub async fn room(&self, room_id: &str) -> Result<RoomSnapshot, ApiError> {
        let resp = self
            .http
            .get(self.endpoint(&format!("/rooms/{room_id}")))
            .send()
            .await?;
        Self::read_json(resp).await
    }

    /// Submit a user message with its routing mode. The returned snapshot
    /// already contains the new messages, but callers that follow the
    /// poll-driven update model are free to ignore it.
    pub async fn ask(&self, room_id: &str, request: &AskRequest) -> Result<RoomSnapshot, ApiError> {
        let resp = self
            .http
            .post(self.endpoint(&format!("/rooms/{room_id}/ask")))
            .json(request)
            .send()
            .await?;
        Self::read_json(resp).await
    }

    pub async fn memory(&self, room_id: &str) -> Result<MemorySnapshot, ApiError> {
        let resp = self
            .http
            .get(self.endpoint(&format!("/rooms/{room_id}/memory")))
            .send()
            .await?;
        Self::read_json(resp).await
    }

    pub async fn query_memory(
        &self,
        room_id: &str,
        question: &str,
        user_name: &str,
    ) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(self.endpoint(&format!("/rooms/{room_id}/memory/query")))
            .json(&serde_json::json!({ "question": question, "user_name": user_name }))
            .send()
            .await?;
        let answer: MemoryAnswer = Self::read_json(resp).await?;
        Ok(answer.answer)
    }
}
