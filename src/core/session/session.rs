use crate::core::communication::transport::{DeviceReader, DeviceWriter, SerialDevice};
use crate::domain::config::SerialConfig;
use crate::domain::error::{SercatError, SercatResult};
use std::time::Duration;

/// Read/write timing applied to an open device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutPolicy {
    /// Inter-byte slack while draining; a drain read returns after this much silence.
    pub read_interval: Duration,
    /// How long one wait for incoming data blocks before it is re-armed.
    pub idle_wait: Duration,
    /// `None` means writes never time out.
    pub write: Option<Duration>,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            read_interval: Duration::from_millis(2),
            idle_wait: Duration::from_millis(500),
            write: None,
        }
    }
}

/// One open device plus the configuration applied to it.
///
/// Relays only ever see the reader/writer capabilities; the session keeps the
/// configuring handle until it is dropped.
pub struct DeviceSession {
    device_name: String,
    config: SerialConfig,
    device: Box<dyn SerialDevice>,
    timeouts: Option<TimeoutPolicy>,
}

impl DeviceSession {
    pub(crate) fn new(device_name: String, config: SerialConfig, device: Box<dyn SerialDevice>) -> Self {
        Self {
            device_name,
            config,
            device,
            timeouts: None,
        }
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    /// The policy applied by `SessionManager::set_timeouts`, if any yet.
    pub fn timeouts(&self) -> Option<TimeoutPolicy> {
        self.timeouts
    }

    pub fn reader(&self) -> SercatResult<Box<dyn DeviceReader>> {
        self.device
            .reader()
            .map_err(|e| SercatError::io("cloning device read handle", e))
    }

    pub fn writer(&self) -> SercatResult<Box<dyn DeviceWriter>> {
        self.device
            .writer()
            .map_err(|e| SercatError::io("cloning device write handle", e))
    }

    pub(crate) fn apply_config(&mut self) -> serialport::Result<()> {
        self.device.configure(&self.config)
    }

    pub(crate) fn apply_timeouts(&mut self, policy: TimeoutPolicy) -> serialport::Result<()> {
        self.device.set_timeouts(&policy)?;
        self.timeouts = Some(policy);
        Ok(())
    }
}

impl std::fmt::Debug for DeviceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceSession")
            .field("device_name", &self.device_name)
            .field("config", &self.config)
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}
