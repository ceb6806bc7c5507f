//! VE.Direct serial protocol codec
//!
//! Victron devices talk over a 19200 baud UART using two interleaved frame
//! families:
//!
//! - TEXT frames, emitted periodically by the device as blocks of
//!   `label<TAB>value<CR><LF>` records closed by a `Checksum` record.
//! - HEX frames, used for request/response traffic and asynchronous
//!   register pushes:
//!
//! ```text
//! ┌───────┬─────────┬──────────────┬───────┬──────────────┬──────────┬─────┐
//! │ ':'   │ COMMAND │ REGISTER (LE)│ FLAGS │ DATA (LE)    │ CHECKSUM │ LF  │
//! │ 1 chr │ 1 digit │ 2 hex pairs  │ 1 pair│ 0-61 pairs   │ 1 pair   │ 1   │
//! └───────┴─────────┴──────────────┴───────┴──────────────┴──────────┴─────┘
//! ```
//!
//! The HEX checksum is chosen so that all frame bytes, checksum included,
//! sum to `0x55` modulo 256. TEXT blocks sum to zero.
//!
//! [`FrameParser`] is a byte-fed state machine that demultiplexes both
//! families from a single serial stream.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod events;
pub mod frame;
pub mod messages;
pub mod parser;
pub mod text;

pub use events::{Frame, FrameError, FrameKind};
pub use frame::{HexDecoder, HexFrame, CHECKSUM_SEED, MAX_ENCODED_SIZE, MAX_HEX_FRAME_SIZE};
pub use messages::{Command, DataType};
pub use parser::FrameParser;
pub use text::{TextBlock, TextRecord, MAX_NAME_LEN, MAX_RECORDS, MAX_VALUE_LEN};
