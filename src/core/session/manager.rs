use crate::core::communication::transport::DeviceOpener;
use crate::core::session::{DeviceSession, TimeoutPolicy};
use crate::domain::config::SerialConfig;
use crate::domain::error::{SercatError, SercatResult};
use crate::infrastructure::logging::Diagnostics;
use crate::infrastructure::serial::PortNaming;

/// Turns a `SerialConfig` into an open, configured `DeviceSession`.
///
/// Open, configure and timeout setup run strictly in order and the first
/// failure aborts; nothing is retried.
pub struct SessionManager<O> {
    opener: O,
    naming: PortNaming,
    diagnostics: Diagnostics,
}

impl<O: DeviceOpener> SessionManager<O> {
    pub fn new(opener: O, naming: PortNaming, diagnostics: Diagnostics) -> Self {
        Self {
            opener,
            naming,
            diagnostics,
        }
    }

    /// Runs open, configure and set_timeouts in sequence.
    pub fn establish(&self, config: SerialConfig) -> SercatResult<DeviceSession> {
        let mut session = self.open(config)?;
        self.configure(&mut session)?;
        self.set_timeouts(&mut session)?;
        Ok(session)
    }

    pub fn open(&self, config: SerialConfig) -> SercatResult<DeviceSession> {
        let device_name = self.naming.device_name(config.port());
        self.diagnostics.emit(
            1,
            format!("Opening port {} (as {})", config.port(), device_name),
        );

        let device = self
            .opener
            .open(&device_name)
            .map_err(|source| SercatError::Open {
                device: device_name.clone(),
                source,
            })?;

        Ok(DeviceSession::new(device_name, config, device))
    }

    pub fn configure(&self, session: &mut DeviceSession) -> SercatResult<()> {
        session.apply_config().map_err(|source| SercatError::Configure {
            device: session.device_name().to_string(),
            source,
        })?;

        let config = session.config();
        self.diagnostics.emit(
            2,
            format!(
                "{} configured: {} baud {}, DTR {}, RTS {}",
                session.device_name(),
                config.baud_rate(),
                config.framing(),
                config.dtr(),
                config.rts()
            ),
        );
        Ok(())
    }

    pub fn set_timeouts(&self, session: &mut DeviceSession) -> SercatResult<()> {
        let policy = TimeoutPolicy::default();
        session
            .apply_timeouts(policy)
            .map_err(|source| SercatError::Configure {
                device: session.device_name().to_string(),
                source,
            })?;

        self.diagnostics.emit(
            3,
            format!(
                "timeouts: read interval {:?}, idle wait {:?}, write {:?}",
                policy.read_interval, policy.idle_wait, policy.write
            ),
        );
        Ok(())
    }
}
