use crate::core::communication::transport::DeviceWriter;
use crate::core::communication::CHUNK_SIZE;
use crate::domain::error::{SercatError, SercatResult};
use crate::infrastructure::logging::Diagnostics;
use std::io::{self, Read};

/// Console → device relay
///
/// Every console read becomes exactly one device write; nothing is batched.
pub struct OutboundRelay<R> {
    input: R,
    writer: Box<dyn DeviceWriter>,
    diagnostics: Diagnostics,
    relayed: u64,
}

impl<R: Read> OutboundRelay<R> {
    pub fn new(input: R, writer: Box<dyn DeviceWriter>, diagnostics: Diagnostics) -> Self {
        Self {
            input,
            writer,
            diagnostics,
            relayed: 0,
        }
    }

    /// Relays until console input reaches end-of-file (`Ok`) or something fails.
    pub fn run(mut self) -> SercatResult<()> {
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            let n = match self.input.read(&mut buf) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(SercatError::io("reading console input", e)),
            };
            if n == 0 {
                self.diagnostics.emit(
                    2,
                    format!("console input closed after {} bytes", self.relayed),
                );
                return Ok(());
            }

            self.writer
                .write_chunk(&buf[..n])
                .map_err(|e| SercatError::io("writing to device", e))?;

            self.relayed += n as u64;
            if self.diagnostics.enabled(3) {
                self.diagnostics
                    .emit(3, format!("tx {} bytes: {}", n, hex::encode(&buf[..n])));
            }
        }
    }
}
