//! Link manager
//!
//! Owns one serial link: the frame parser, the command session and the
//! dispatcher. The host feeds received bytes through [`Manager::receive`]
//! and drives timeouts, liveness pings and register polling with
//! [`Manager::tick`]. Everything runs on the caller's loop; nothing blocks.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use log::{debug, trace, warn};
use vedirect_hal::{UartConfig, UartRx, UartTx};
use vedirect_protocol::{Command, Frame, FrameError, FrameKind, FrameParser, HexFrame};

use crate::config::{
    AutoCreate, ManagerConfig, DEFAULT_HEX_AUTO_CREATE_LIMIT, DEFAULT_TEXT_AUTO_CREATE_LIMIT,
};
use crate::dispatch::{encode_numeric, Dispatcher};
use crate::error::{RequestError, SendError};
use crate::registers::RegisterDef;
use crate::session::{Callback, CommandSession, SessionState};

/// Bytes read from the receiver per call
const RX_CHUNK_SIZE: usize = 64;

/// Hook fired for every valid HEX frame
pub type FrameHook = Box<dyn FnMut(&HexFrame)>;

/// Composition root for one VE.Direct link
pub struct Manager<T: UartTx> {
    uart: T,
    parser: FrameParser,
    session: CommandSession,
    dispatcher: Dispatcher,
    frame_hooks: Vec<FrameHook>,
    /// Registers still to be read after connecting
    poll_queue: VecDeque<u16>,
    connected: bool,
    last_frame_ms: u64,
    link_timeout_ms: u64,
    /// 0 disables the liveness ping
    ping_interval_ms: u64,
    last_ping_ms: Option<u64>,
}

impl<T: UartTx> Manager<T> {
    pub fn new(uart: T, config: &ManagerConfig, dispatcher: Dispatcher) -> Self {
        Self {
            uart,
            parser: FrameParser::new(),
            session: CommandSession::new(config.command_timeout_ms),
            dispatcher,
            frame_hooks: Vec::new(),
            poll_queue: VecDeque::new(),
            connected: false,
            last_frame_ms: 0,
            link_timeout_ms: config.link_timeout_ms as u64,
            ping_interval_ms: config.ping_timeout_s as u64 * 1000,
            last_ping_ms: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// Registers waiting to be polled
    pub fn pending_polls(&self) -> usize {
        self.poll_queue.len()
    }

    /// Line settings the link must be opened with
    pub fn uart_config() -> UartConfig {
        UartConfig::default()
    }

    /// Drain `rx` into the parser
    ///
    /// Returns the number of bytes read.
    pub fn poll_rx<R: UartRx>(&mut self, rx: &mut R, now_ms: u64) -> Result<usize, R::Error> {
        let mut buffer = [0u8; RX_CHUNK_SIZE];
        let mut total = 0;
        loop {
            let len = rx.read_available(&mut buffer)?;
            if len == 0 {
                return Ok(total);
            }
            self.receive(&buffer[..len], now_ms);
            total += len;
        }
    }

    /// Feed received bytes; completed frames are handled immediately
    pub fn receive(&mut self, bytes: &[u8], now_ms: u64) {
        for &byte in bytes {
            match self.parser.feed(byte) {
                Ok(None) => {}
                Ok(Some(frame)) => self.on_frame(frame, now_ms),
                Err(error) => self.on_frame_error(error),
            }
        }
    }

    /// Periodic processing
    ///
    /// Expires the pending request, detects link loss, then sends at most
    /// one ping or poll request.
    pub fn tick(&mut self, now_ms: u64) {
        self.session.tick(now_ms);

        if self.connected && now_ms.saturating_sub(self.last_frame_ms) >= self.link_timeout_ms {
            self.disconnect();
        }

        if !self.session.is_idle() {
            return;
        }

        if self.ping_due(now_ms) {
            self.last_ping_ms = Some(now_ms);
            if let Err(error) = self.send(HexFrame::command(Command::Ping), now_ms, None) {
                warn!("ping failed: {}", error);
            }
            return;
        }

        if let Some(address) = self.poll_queue.pop_front() {
            if let Err(error) = self.send(HexFrame::get(address), now_ms, None) {
                warn!("poll of 0x{:04X} failed: {}", address, error);
            }
            if self.poll_queue.is_empty() {
                debug!("polling done");
            }
        }
    }

    /// Send a user supplied HEX frame, e.g. `"7F0ED00"`
    ///
    /// The checksum is computed and appended.
    pub fn send_hex_frame(
        &mut self,
        hex: &str,
        now_ms: u64,
        callback: Option<Callback>,
    ) -> Result<(), SendError> {
        let frame = HexFrame::from_hex_str(hex, true).map_err(|error| {
            warn!("invalid HEX frame {}: {}", hex, error);
            SendError::Encoding
        })?;
        self.send(frame, now_ms, callback)
    }

    /// Send a command
    ///
    /// `Get` needs `register_id`, `Set` needs `register_id` and 1, 2 or 4
    /// bytes of `data`. Other request commands are sent without payload,
    /// response-only commands are rejected.
    pub fn send_command(
        &mut self,
        command: Command,
        register_id: Option<u16>,
        data: &[u8],
        now_ms: u64,
        callback: Option<Callback>,
    ) -> Result<(), SendError> {
        let frame = match command {
            Command::Get => HexFrame::get(register_id.ok_or(SendError::Encoding)?),
            Command::Set => {
                let register_id = register_id.ok_or(SendError::Encoding)?;
                if !matches!(data.len(), 1 | 2 | 4) {
                    return Err(SendError::Encoding);
                }
                HexFrame::set(register_id, data).map_err(|_| SendError::Encoding)?
            }
            other if other.is_request() => HexFrame::command(other),
            other => {
                warn!("{:?} is not a request command", other);
                return Err(SendError::Encoding);
            }
        };
        self.send(frame, now_ms, callback)
    }

    /// Write an engineering value to a numeric register
    ///
    /// Read-only registers are rejected without touching the link.
    pub fn set_numeric(
        &mut self,
        def: &RegisterDef,
        value: f64,
        now_ms: u64,
        callback: Option<Callback>,
    ) -> Result<(), SendError> {
        if !def.is_writable() {
            warn!("register {} is read-only", def.name);
            return Err(SendError::Encoding);
        }
        let mut data = [0u8; 4];
        let len = encode_numeric(def, value, &mut data).ok_or(SendError::Encoding)?;
        self.send_command(Command::Set, Some(def.address), &data[..len], now_ms, callback)
    }

    /// Change the liveness ping interval, 0 disables it
    pub fn set_ping_timeout(&mut self, seconds: u32) {
        self.ping_interval_ms = seconds as u64 * 1000;
    }

    pub fn set_auto_create_entities(&mut self, kind: FrameKind, setting: AutoCreate) {
        let default = match kind {
            FrameKind::Hex => DEFAULT_HEX_AUTO_CREATE_LIMIT,
            FrameKind::Text => DEFAULT_TEXT_AUTO_CREATE_LIMIT,
        };
        self.dispatcher.set_auto_create(kind, setting.limit(default));
    }

    /// Register a hook fired for every valid HEX frame, before matching
    pub fn on_frame_received<F>(&mut self, hook: F)
    where
        F: FnMut(&HexFrame) + 'static,
    {
        self.frame_hooks.push(Box::new(hook));
    }

    fn send(
        &mut self,
        frame: HexFrame,
        now_ms: u64,
        callback: Option<Callback>,
    ) -> Result<(), SendError> {
        self.session.send(&mut self.uart, frame, now_ms, callback)
    }

    fn ping_due(&self, now_ms: u64) -> bool {
        if self.ping_interval_ms == 0 {
            return false;
        }
        match self.last_ping_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.ping_interval_ms,
            None => true,
        }
    }

    fn on_frame(&mut self, frame: Frame, now_ms: u64) {
        self.last_frame_ms = now_ms;
        if !self.connected {
            self.connect();
        }
        match frame {
            Frame::Hex(frame) => self.on_hex_frame(&frame),
            Frame::Text(block) => self.dispatcher.on_text_block(&block),
        }
    }

    fn on_hex_frame(&mut self, frame: &HexFrame) {
        trace!("received {}", frame);
        for hook in &mut self.frame_hooks {
            hook(frame);
        }

        let command = frame.response_command();
        if command == Some(Command::Async) {
            self.dispatcher.on_hex_frame(frame);
            return;
        }
        let carries_register = matches!(command, Some(Command::Get | Command::Set));
        let resolved = self.session.on_response(frame);
        if carries_register {
            // Register data is valid whatever request it answered
            self.dispatcher.on_hex_frame(frame);
        } else if resolved.is_none() {
            debug!("unexpected frame {}", frame);
        }
    }

    fn on_frame_error(&mut self, error: FrameError) {
        match error.kind() {
            FrameKind::Hex => warn!("HEX frame dropped: {}", error),
            FrameKind::Text => warn!("TEXT block dropped: {}", error),
        }
    }

    fn connect(&mut self) {
        self.connected = true;
        self.poll_queue.clear();
        self.poll_queue.extend(self.dispatcher.bound_addresses());
        debug!("link connected, polling {} registers", self.poll_queue.len());
    }

    fn disconnect(&mut self) {
        warn!("link timeout");
        self.connected = false;
        self.parser.reset();
        self.poll_queue.clear();
        self.session.fail_pending(RequestError::Timeout);
        self.dispatcher.link_disconnected();
    }
}
