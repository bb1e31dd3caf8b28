//! SerCat Library
//!
//! Minimal serial terminal bridge: opens one serial port and relays bytes
//! between the device and the console in both directions at once.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::communication::DuplexEngine;
pub use crate::core::session::{DeviceSession, SessionManager, TimeoutPolicy};
pub use crate::domain::config::{Framing, SerialConfig};
pub use crate::domain::error::{SercatError, SercatResult};
pub use crate::infrastructure::logging::Diagnostics;
