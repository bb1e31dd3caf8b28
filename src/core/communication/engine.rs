use crate::core::communication::{InboundRelay, OutboundRelay};
use crate::core::session::DeviceSession;
use crate::domain::error::{SercatError, SercatResult};
use crate::infrastructure::logging::Diagnostics;
use std::convert::Infallible;
use std::io::{self, Read, Write};
use tokio::task::{self, JoinError, JoinHandle};
use tracing::debug;

/// Full-duplex engine over one device session
///
/// Runs the inbound and outbound relays on their own blocking threads. The
/// session stays owned here; the relays only get cloned read or write handles.
pub struct DuplexEngine {
    session: DeviceSession,
    diagnostics: Diagnostics,
}

impl DuplexEngine {
    pub fn new(session: DeviceSession, diagnostics: Diagnostics) -> Self {
        Self {
            session,
            diagnostics,
        }
    }

    /// Relays until either direction fails and returns that failure.
    ///
    /// End of console input stops only the outbound direction.
    pub async fn run<I, O>(self, input: I, output: O) -> SercatResult<()>
    where
        I: Read + Send + 'static,
        O: Write + Send + 'static,
    {
        let policy = self.session.timeouts().ok_or_else(|| SercatError::Configure {
            device: self.session.device_name().to_string(),
            source: serialport::Error::new(
                serialport::ErrorKind::InvalidInput,
                "no timeout policy has been applied to the device",
            ),
        })?;
        let inbound = InboundRelay::new(self.session.reader()?, output, policy, self.diagnostics);
        let outbound = OutboundRelay::new(input, self.session.writer()?, self.diagnostics);

        self.diagnostics.emit(
            2,
            format!("Relaying {} <-> console", self.session.device_name()),
        );

        let outbound = task::spawn_blocking(move || outbound.run());
        let inbound = task::spawn_blocking(move || inbound.run());

        tokio::select! {
            result = inbound_failure(inbound) => result,
            result = outbound_failure(outbound) => result,
        }
    }
}

async fn inbound_failure(handle: JoinHandle<SercatResult<Infallible>>) -> SercatResult<()> {
    match handle.await {
        Ok(Ok(never)) => match never {},
        Ok(Err(e)) => Err(e),
        Err(e) => Err(relay_panicked("inbound relay", e)),
    }
}

async fn outbound_failure(handle: JoinHandle<SercatResult<()>>) -> SercatResult<()> {
    match handle.await {
        Ok(Ok(())) => {
            debug!("outbound relay finished, inbound relay continues");
            std::future::pending().await
        }
        Ok(Err(e)) => Err(e),
        Err(e) => Err(relay_panicked("outbound relay", e)),
    }
}

fn relay_panicked(context: &'static str, error: JoinError) -> SercatError {
    SercatError::io(context, io::Error::other(error))
}
