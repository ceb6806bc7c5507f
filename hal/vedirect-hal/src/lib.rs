//! VE.Direct Hardware Abstraction Layer
//!
//! Serial port traits the protocol engine writes through. Platform crates
//! implement them on top of their UART drivers; tests use an in-memory
//! double.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  vedirect-core (Manager, CommandSession)│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vedirect-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          platform UART driver
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod uart;

pub use uart::{UartConfig, UartRx, UartTx};
