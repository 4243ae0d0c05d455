use std::cell::Cell;
use std::time::Duration;

use crate::api::client::{ApiClient, ApiError};
use crate::api::models::{MemorySnapshot, Message};

pub const POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Everything one tick replaces wholesale in the view. The memory snapshot
/// is absent when only its read failed; the room state still applies.
#[derive(Debug)]
pub struct PollUpdate {
    pub messages: Vec<Message>,
    pub project_summary: String,
    pub memory: Option<MemorySnapshot>,
}

/// One polling tick: read the room state, then the memory snapshot. The two
/// reads are independent — a failed room read abandons the tick, but a
/// failed memory read only skips the memory replacement, so the transcript
/// keeps moving while the memory endpoint is down. The caller schedules the
/// next tick regardless, with no backoff.
pub async fn poll_once(client: &ApiClient, room_id: &str) -> Result<PollUpdate, ApiError> {
    let room = client.room(room_id).await?;
    let memory = match client.memory(room_id).await {
        Ok(memory) => Some(memory),
        Err(err) => {
            tracing::warn!("memory read failed, keeping previous snapshot: {err}");
            None
        }
    };
    Ok(PollUpdate {
        messages: room.messages,
        project_summary: room.project_summary,
        memory,
    })
}

/// Keeps ticks strictly sequential: while a tick's requests are still
/// settling, the timer fires into `try_begin` and is turned away.
#[derive(Debug, Default)]
pub struct PollGate {
    busy: Cell<bool>,
}

impl PollGate {
    pub fn try_begin(&self) -> bool {
        if self.busy.get() {
            false
        } else {
            self.busy.set(true);
            true
        }
    }

    pub fn finish(&self) {
        self.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn tick_reads_room_then_memory() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rooms/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "room_id": "r1",
                "room_name": "Demo",
                "project_summary": "Sidebar and chat feed are wired.",
                "messages": [{
                    "id": "m1",
                    "sender_id": "user:ana",
                    "sender_name": "Ana",
                    "role": "user",
                    "content": "Hello",
                }],
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rooms/r1/memory"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "memory_summary": "Team is integrating the command bar.",
                "notes": ["Ana asked about the demo."],
                "count": 1,
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri());
        let update = poll_once(&client, "r1").await.unwrap();
        assert_eq!(update.messages.len(), 1);
        assert_eq!(update.messages[0].sender_name, "Ana");
        assert_eq!(update.project_summary, "Sidebar and chat feed are wired.");
        assert_eq!(update.memory.unwrap().count, 1);
    }

    #[tokio::test]
    async fn room_update_survives_memory_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rooms/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "room_id": "r1",
                "room_name": "Demo",
                "project_summary": "Command bar is wired.",
                "messages": [{
                    "id": "m1",
                    "sender_id": "user:ana",
                    "sender_name": "Ana",
                    "role": "user",
                    "content": "Hello",
                }],
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rooms/r1/memory"))
            .respond_with(ResponseTemplate::new(500).set_body_string("memory store offline"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri());
        let update = poll_once(&client, "r1").await.unwrap();
        assert_eq!(update.messages.len(), 1);
        assert_eq!(update.project_summary, "Command bar is wired.");
        assert!(update.memory.is_none());
    }

    #[tokio::test]
    async fn failed_room_read_abandons_the_tick() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rooms/r1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("room lookup failed"))
            .mount(&server)
            .await;
        // The memory read must not happen once the room read has failed.
        Mock::given(method("GET"))
            .and(path("/rooms/r1/memory"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "memory_summary": "",
                "notes": [],
                "count": 0,
            })))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri());
        assert!(poll_once(&client, "r1").await.is_err());
    }

    #[test]
    fn gate_rejects_overlapping_ticks() {
        let gate = PollGate::default();
        assert!(gate.try_begin());
        assert!(!gate.try_begin());
        gate.finish();
        assert!(gate.try_begin());
    }
}
