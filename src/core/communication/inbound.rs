use crate::core::communication::transport::DeviceReader;
use crate::core::communication::CHUNK_SIZE;
use crate::core::session::TimeoutPolicy;
use crate::domain::error::{SercatError, SercatResult};
use crate::infrastructure::logging::Diagnostics;
use std::convert::Infallible;
use std::io::Write;

/// Device → console relay
///
/// Waits for incoming data, then drains the device until a read comes back
/// empty before waiting again. Bytes are forwarded untouched as soon as they
/// are read.
pub struct InboundRelay<W> {
    reader: Box<dyn DeviceReader>,
    output: W,
    policy: TimeoutPolicy,
    diagnostics: Diagnostics,
    relayed: u64,
}

impl<W: Write> InboundRelay<W> {
    pub fn new(
        reader: Box<dyn DeviceReader>,
        output: W,
        policy: TimeoutPolicy,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            reader,
            output,
            policy,
            diagnostics,
            relayed: 0,
        }
    }

    /// Relays until the first failure, which is returned.
    pub fn run(mut self) -> SercatResult<Infallible> {
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            let n = self
                .reader
                .read_timeout(&mut buf, self.policy.idle_wait)
                .map_err(|e| SercatError::io("waiting for device data", e))?;
            if n == 0 {
                continue;
            }

            self.forward(&buf[..n])?;
            self.drain(&mut buf)?;
        }
    }

    fn drain(&mut self, buf: &mut [u8]) -> SercatResult<()> {
        loop {
            let n = self
                .reader
                .read_timeout(buf, self.policy.read_interval)
                .map_err(|e| SercatError::io("reading from device", e))?;
            if n == 0 {
                return Ok(());
            }
            self.forward(&buf[..n])?;
        }
    }

    fn forward(&mut self, chunk: &[u8]) -> SercatResult<()> {
        self.output
            .write_all(chunk)
            .and_then(|_| self.output.flush())
            .map_err(|e| SercatError::io("writing to console output", e))?;

        self.relayed += chunk.len() as u64;
        if self.diagnostics.enabled(3) {
            self.diagnostics.emit(
                3,
                format!("rx {} bytes ({} total): {}", chunk.len(), self.relayed, hex::encode(chunk)),
            );
        }
        Ok(())
    }
}
