use crate::core::session::TimeoutPolicy;
use crate::domain::config::SerialConfig;
use std::io;
use std::time::Duration;

/// Opens devices by their platform name
pub trait DeviceOpener {
    fn open(&self, device: &str) -> serialport::Result<Box<dyn SerialDevice>>;
}

/// Full-capability handle to an open device, owned by a `DeviceSession`.
pub trait SerialDevice: Send {
    /// Applies baud rate, framing and DTR/RTS modes in one step.
    fn configure(&mut self, config: &SerialConfig) -> serialport::Result<()>;

    fn set_timeouts(&mut self, policy: &TimeoutPolicy) -> serialport::Result<()>;

    /// Read-only capability handed to the inbound relay.
    fn reader(&self) -> io::Result<Box<dyn DeviceReader>>;

    /// Write-only capability handed to the outbound relay.
    fn writer(&self) -> io::Result<Box<dyn DeviceWriter>>;
}

pub trait DeviceReader: Send {
    /// Blocks until bytes arrive or `timeout` elapses. `Ok(0)` means nothing arrived.
    fn read_timeout(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<usize>;
}

pub trait DeviceWriter: Send {
    /// Returns once the device has accepted every byte of `data`.
    fn write_chunk(&mut self, data: &[u8]) -> io::Result<()>;
}
