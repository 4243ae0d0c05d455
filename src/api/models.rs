use serde::{Deserialize, Serialize};

/// Routing directive for a submitted message: `self` logs the ask with one
/// agent, `teammate` targets a single agent, `team` fans out to everyone
/// and the coordinator synthesizes a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[serde(rename = "self")]
    Self_,
    Teammate,
    Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One transcript entry, in the order the backend returned it. The client
/// never reorders or deduplicates messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomCreated {
    pub room_id: String,
    #[serde(default)]
    pub room_name: String,
}

/// Full room state as returned by `GET /rooms/{id}` and the ask endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomSnapshot {
    #[serde(default)]
    pub room_id: String,
    #[serde(default)]
    pub room_name: String,
    #[serde(default)]
    pub project_summary: String,
    #[serde(default)]
    pub memory_summary: String,
    #[serde(default)]
    pub memory_count: usize,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Rolling digest of the conversation, replaced wholesale on every poll.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySnapshot {
    #[serde(default)]
    pub memory_summary: String,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AskRequest {
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_agent: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MemoryAnswer {
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_serializes_to_wire_names() {
        assert_eq!(serde_json::to_string(&Mode::Self_).unwrap(), "\"self\"");
        assert_eq!(serde_json::to_string(&Mode::Teammate).unwrap(), "\"teammate\"");
        assert_eq!(serde_json::to_string(&Mode::Team).unwrap(), "\"team\"");
    }

    #[test]
    fn team_ask_omits_target_agent() {
        let req = AskRequest {
            user_id: "ana".into(),
            user_name: "Ana".into(),
            content: "Hello".into(),
            mode: Mode::Team,
            target_agent: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("target_agent").is_none());
        assert_eq!(value["mode"], "team");
    }

    #[test]
    fn room_snapshot_tolerates_missing_fields() {
        let snap: RoomSnapshot = serde_json::from_str(r#"{"messages": []}"#).unwrap();
        assert!(snap.messages.is_empty());
        assert!(snap.project_summary.is_empty());
    }
}
