//! Session state machine

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Ready to send
    #[default]
    Idle,
    /// Request written, waiting for the device
    AwaitingResponse,
    /// Matching response received
    Completed,
    /// Deadline passed or link dropped
    TimedOut,
    /// Mismatched or failed response
    Errored,
}

/// Events driving the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// Request written to the link
    Sent,
    /// Response accepted
    Response,
    /// Deadline expired
    Deadline,
    /// Response rejected
    Failed,
    /// Caller notified of the outcome
    Acknowledged,
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::AwaitingResponse)
    }

    /// Outcome reached, caller not yet notified
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Completed | SessionState::TimedOut | SessionState::Errored
        )
    }

    /// Process an event and return the next state
    pub fn transition(self, event: SessionEvent) -> Self {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            (Idle, Sent) => AwaitingResponse,

            (AwaitingResponse, Response) => Completed,
            (AwaitingResponse, Deadline) => TimedOut,
            (AwaitingResponse, Failed) => Errored,

            (Completed | TimedOut | Errored, Acknowledged) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_cycle() {
        let state = SessionState::Idle.transition(SessionEvent::Sent);
        assert_eq!(state, SessionState::AwaitingResponse);
        let state = state.transition(SessionEvent::Response);
        assert_eq!(state, SessionState::Completed);
        assert_eq!(state.transition(SessionEvent::Acknowledged), SessionState::Idle);
    }

    #[test]
    fn test_outcomes_return_to_idle() {
        for (event, outcome) in [
            (SessionEvent::Response, SessionState::Completed),
            (SessionEvent::Deadline, SessionState::TimedOut),
            (SessionEvent::Failed, SessionState::Errored),
        ] {
            let state = SessionState::AwaitingResponse.transition(event);
            assert_eq!(state, outcome);
            assert!(state.is_terminal());
            assert!(state.transition(SessionEvent::Acknowledged).is_idle());
        }
    }

    #[test]
    fn test_send_while_busy_ignored() {
        let state = SessionState::AwaitingResponse.transition(SessionEvent::Sent);
        assert_eq!(state, SessionState::AwaitingResponse);
    }

    #[test]
    fn test_idle_ignores_responses() {
        for event in [SessionEvent::Response, SessionEvent::Deadline, SessionEvent::Failed] {
            assert_eq!(SessionState::Idle.transition(event), SessionState::Idle);
        }
    }
}
