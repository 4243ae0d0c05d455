use std::cell::{Cell, RefCell};

use crate::api::models::{AskRequest, Mode};

/// Builds and tracks user submissions. At most one request is outstanding
/// at a time, and a failed send hands the draft back so the UI can restore
/// it instead of losing the user's text.
#[derive(Debug)]
pub struct MessageDispatcher {
    user_id: String,
    user_name: String,
    in_flight: Cell<bool>,
    draft: RefCell<Option<String>>,
}

impl MessageDispatcher {
    pub fn new(user_id: String, user_name: String) -> Self {
        Self {
            user_id,
            user_name,
            in_flight: Cell::new(false),
            draft: RefCell::new(None),
        }
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.get()
    }

    /// Validate the input and open a send. Returns `None` — and performs no
    /// work — for blank input, for a missing target in non-team modes, or
    /// while an earlier send is still outstanding.
    pub fn begin(&self, input: &str, mode: Mode, target: Option<&str>) -> Option<AskRequest> {
        let content = input.trim();
        if content.is_empty() {
            return None;
        }
        if self.in_flight.get() {
            return None;
        }
        let target_agent = match mode {
            Mode::Team => None,
            Mode::Self_ | Mode::Teammate => Some(target?.to_string()),
        };
        self.in_flight.set(true);
        *self.draft.borrow_mut() = Some(content.to_string());
        Some(AskRequest {
            user_id: self.user_id.clone(),
            user_name: self.user_name.clone(),
            content: content.to_string(),
            mode,
            target_agent,
        })
    }

    /// The message was accepted; it will show up on the next poll tick.
    pub fn succeed(&self) {
        self.in_flight.set(false);
        self.draft.borrow_mut().take();
    }

    /// The send failed. Returns the draft so the input buffer can be put
    /// back exactly as it was submitted.
    pub fn fail(&self) -> Option<String> {
        self.in_flight.set(false);
        self.draft.borrow_mut().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> MessageDispatcher {
        MessageDispatcher::new("ana".into(), "Ana".into())
    }

    #[test]
    fn blank_input_never_opens_a_send() {
        let d = dispatcher();
        assert!(d.begin("", Mode::Team, None).is_none());
        assert!(d.begin("   \t ", Mode::Team, None).is_none());
        assert!(!d.is_sending());
    }

    #[test]
    fn second_send_is_a_no_op_while_one_is_outstanding() {
        let d = dispatcher();
        assert!(d.begin("Hello", Mode::Team, None).is_some());
        assert!(d.is_sending());
        assert!(d.begin("Again", Mode::Team, None).is_none());
        d.succeed();
        assert!(d.begin("Again", Mode::Team, None).is_some());
    }

    #[test]
    fn failure_hands_back_the_submitted_draft() {
        let d = dispatcher();
        d.begin("Hello", Mode::Team, None).unwrap();
        assert_eq!(d.fail().as_deref(), Some("Hello"));
        assert!(!d.is_sending());
    }

    #[test]
    fn success_discards_the_draft() {
        let d = dispatcher();
        d.begin("Hello", Mode::Team, None).unwrap();
        d.succeed();
        assert_eq!(d.fail(), None);
    }

    #[test]
    fn non_team_modes_require_a_target() {
        let d = dispatcher();
        assert!(d.begin("Hello", Mode::Teammate, None).is_none());
        assert!(d.begin("Hello", Mode::Self_, None).is_none());
        assert!(!d.is_sending());

        let req = d.begin("Hello", Mode::Teammate, Some("sean")).unwrap();
        assert_eq!(req.target_agent.as_deref(), Some("sean"));
    }

    #[test]
    fn team_mode_drops_any_selected_target() {
        let d = dispatcher();
        let req = d.begin("Hello", Mode::Team, Some("yug")).unwrap();
        assert_eq!(req.target_agent, None);
        assert_eq!(req.mode, Mode::Team);
    }

    #[test]
    fn request_carries_identity_and_trimmed_content() {
        let d = dispatcher();
        let req = d.begin("  Hello team  ", Mode::Team, None).unwrap();
        assert_eq!(req.user_id, "ana");
        assert_eq!(req.user_name, "Ana");
        assert_eq!(req.content, "Hello team");
    }
}
