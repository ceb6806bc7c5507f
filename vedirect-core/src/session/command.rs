//! Command session: request transmission, response matching and timeouts

use alloc::boxed::Box;

use log::{trace, warn};
use vedirect_hal::UartTx;
use vedirect_protocol::{Command, HexFrame};

use super::machine::{SessionEvent, SessionState};
use crate::error::{RequestError, SendError};

/// Default response deadline
pub const DEFAULT_COMMAND_TIMEOUT_MS: u32 = 1000;

/// Outcome of a request, handed to its callback
#[derive(Debug)]
pub struct Completion<'a> {
    pub request: &'a HexFrame,
    /// Response frame, absent on timeout
    pub response: Option<&'a HexFrame>,
    pub result: Result<(), RequestError>,
}

/// Completion callback, invoked exactly once
pub type Callback = Box<dyn FnOnce(&Completion<'_>)>;

struct Pending {
    request: HexFrame,
    deadline_ms: u64,
    callback: Option<Callback>,
}

/// The single request slot of a link
pub struct CommandSession {
    state: SessionState,
    pending: Option<Pending>,
    timeout_ms: u32,
}

impl Default for CommandSession {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT_MS)
    }
}

impl CommandSession {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            state: SessionState::Idle,
            pending: None,
            timeout_ms,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn set_timeout(&mut self, timeout_ms: u32) {
        self.timeout_ms = timeout_ms;
    }

    /// Request awaiting its response
    pub fn pending_request(&self) -> Option<&HexFrame> {
        self.pending.as_ref().map(|pending| &pending.request)
    }

    /// Write `frame` and wait for its response
    ///
    /// Returns immediately. The outcome is delivered to `callback` from a
    /// later [`Self::on_response`], [`Self::tick`] or [`Self::fail_pending`].
    pub fn send<T: UartTx>(
        &mut self,
        uart: &mut T,
        frame: HexFrame,
        now_ms: u64,
        callback: Option<Callback>,
    ) -> Result<(), SendError> {
        if !self.state.is_idle() {
            return Err(SendError::Busy);
        }
        let encoded = frame.encode_to_vec().map_err(|_| SendError::Encoding)?;
        uart.write_blocking(&encoded).map_err(|_| SendError::Link)?;
        uart.flush().map_err(|_| SendError::Link)?;
        trace!("sent {}", frame);

        self.state = self.state.transition(SessionEvent::Sent);
        self.pending = Some(Pending {
            request: frame,
            deadline_ms: now_ms + self.timeout_ms as u64,
            callback,
        });
        Ok(())
    }

    /// Resolve the pending request with a response frame
    ///
    /// Returns `None` when no request is pending.
    pub fn on_response(&mut self, response: &HexFrame) -> Option<Result<(), RequestError>> {
        let pending = self.pending.take()?;
        let result = match_response(&pending.request, response);
        self.finish(pending, Some(response), result);
        Some(result)
    }

    /// Expire the pending request once its deadline passed
    ///
    /// Returns true if a request timed out.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.pending.take() {
            Some(pending) if now_ms >= pending.deadline_ms => {
                self.finish(pending, None, Err(RequestError::Timeout));
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Fail the pending request, if any
    pub fn fail_pending(&mut self, error: RequestError) {
        if let Some(pending) = self.pending.take() {
            self.finish(pending, None, Err(error));
        }
    }

    fn finish(
        &mut self,
        pending: Pending,
        response: Option<&HexFrame>,
        result: Result<(), RequestError>,
    ) {
        let event = match result {
            Ok(()) => SessionEvent::Response,
            Err(RequestError::Timeout) => SessionEvent::Deadline,
            Err(_) => SessionEvent::Failed,
        };
        self.state = self.state.transition(event);
        if let Err(error) = result {
            warn!("request {} failed: {}", pending.request, error);
        }
        if let Some(callback) = pending.callback {
            callback(&Completion {
                request: &pending.request,
                response,
                result,
            });
        }
        self.state = self.state.transition(SessionEvent::Acknowledged);
    }
}

/// Check a response against the request it answers
pub fn match_response(request: &HexFrame, response: &HexFrame) -> Result<(), RequestError> {
    match response.response_command() {
        Some(command @ (Command::Get | Command::Set)) => {
            if request.request_command() != Some(command)
                || request.register_id() != response.register_id()
            {
                Err(RequestError::Unexpected)
            } else if response.flags().is_some_and(|flags| flags != 0) {
                Err(RequestError::Flags)
            } else {
                Ok(())
            }
        }
        Some(Command::PingResp) => match request.request_command() {
            Some(Command::Ping) => Ok(()),
            _ => Err(RequestError::Unexpected),
        },
        Some(Command::Done) => Ok(()),
        _ => Err(RequestError::Remote),
    }
}
