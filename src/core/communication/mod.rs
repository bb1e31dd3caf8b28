// Communication module - Duplex relays between device and console
pub mod engine;
pub mod inbound;
pub mod outbound;
pub mod transport;

pub use engine::DuplexEngine;
pub use inbound::InboundRelay;
pub use outbound::OutboundRelay;
pub use transport::{DeviceOpener, DeviceReader, DeviceWriter, SerialDevice};

/// Scratch buffer size for a single read in either direction.
pub const CHUNK_SIZE: usize = 16;
