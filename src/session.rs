use crate::api::models::RoomCreated;

/// Room lifecycle for one UI instance. The room is created once at startup
/// and its id is held until the window closes. A creation failure leaves
/// the session disabled; there is no automatic retry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoomSession {
    #[default]
    Pending,
    Active { room_id: String, room_name: String },
    Failed,
}

impl RoomSession {
    /// Adopt a freshly created room. A blank identifier counts as a failed
    /// creation so no downstream call ever sees a partial id.
    pub fn activate(&mut self, created: &RoomCreated) -> bool {
        if created.room_id.trim().is_empty() {
            *self = RoomSession::Failed;
            false
        } else {
            *self = RoomSession::Active {
                room_id: created.room_id.clone(),
                room_name: created.room_name.clone(),
            };
            true
        }
    }

    pub fn fail(&mut self) {
        *self = RoomSession::Failed;
    }

    pub fn room_id(&self) -> Option<&str> {
        match self {
            RoomSession::Active { room_id, .. } => Some(room_id),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RoomSession::Active { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(id: &str) -> RoomCreated {
        RoomCreated {
            room_id: id.into(),
            room_name: "Demo".into(),
        }
    }

    #[test]
    fn activation_keeps_the_identifier() {
        let mut session = RoomSession::default();
        assert!(session.activate(&created("r1")));
        assert_eq!(session.room_id(), Some("r1"));
        assert!(session.is_active());
    }

    #[test]
    fn blank_identifier_disables_the_session() {
        let mut session = RoomSession::default();
        assert!(!session.activate(&created("   ")));
        assert_eq!(session.room_id(), None);
        assert_eq!(session, RoomSession::Failed);
    }

    #[test]
    fn pending_session_exposes_no_room() {
        let session = RoomSession::default();
        assert_eq!(session.room_id(), None);
        assert!(!session.is_active());
    }

    #[test]
    fn failure_is_terminal_for_the_instance() {
        let mut session = RoomSession::default();
        session.fail();
        assert_eq!(session, RoomSession::Failed);
        assert_eq!(session.room_id(), None);
    }
}
