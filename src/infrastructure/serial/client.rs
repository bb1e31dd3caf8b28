use crate::core::communication::transport::{DeviceOpener, DeviceReader, DeviceWriter, SerialDevice};
use crate::core::session::TimeoutPolicy;
use crate::domain::config::{DataBits, DtrControl, Parity, RtsControl, SerialConfig, StopBits};
use serialport::{ErrorKind, FlowControl, SerialPort};
use std::io::{self, Read, Write};
use std::time::Duration;
use tracing::debug;

/// Line speed used between opening a port and applying its configuration.
const OPEN_BAUD_RATE: u32 = 9600;

/// Opens real serial ports through the `serialport` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialPortOpener;

impl DeviceOpener for SerialPortOpener {
    fn open(&self, device: &str) -> serialport::Result<Box<dyn SerialDevice>> {
        let port = serialport::new(device, OPEN_BAUD_RATE)
            .timeout(TimeoutPolicy::default().idle_wait)
            .open()?;

        debug!("Serial port {} opened", device);
        Ok(Box::new(SerialPortDevice { port }))
    }
}

pub struct SerialPortDevice {
    port: Box<dyn SerialPort>,
}

impl SerialDevice for SerialPortDevice {
    fn configure(&mut self, config: &SerialConfig) -> serialport::Result<()> {
        let framing = config.framing();

        self.port.set_baud_rate(config.baud_rate())?;
        self.port.set_data_bits(to_serialport_data_bits(framing.data_bits))?;
        self.port.set_parity(to_serialport_parity(framing.parity)?)?;
        self.port.set_stop_bits(to_serialport_stop_bits(framing.stop_bits))?;

        match config.rts() {
            RtsControl::Handshake => self.port.set_flow_control(FlowControl::Hardware)?,
            RtsControl::Enable | RtsControl::Disable => {
                self.port.set_flow_control(FlowControl::None)?;
                let level = config.rts() == RtsControl::Enable;
                modem_line("RTS", self.port.write_request_to_send(level))?;
            }
            RtsControl::Toggle => return Err(unsupported("RTS toggle mode")),
        }

        match config.dtr() {
            DtrControl::Enable => modem_line("DTR", self.port.write_data_terminal_ready(true))?,
            DtrControl::Disable => modem_line("DTR", self.port.write_data_terminal_ready(false))?,
            DtrControl::Handshake => return Err(unsupported("DTR handshake mode")),
        }

        Ok(())
    }

    fn set_timeouts(&mut self, policy: &TimeoutPolicy) -> serialport::Result<()> {
        self.port.set_timeout(policy.read_interval)
    }

    fn reader(&self) -> io::Result<Box<dyn DeviceReader>> {
        let port = self.port.try_clone()?;
        let timeout = port.timeout();
        Ok(Box::new(PortReader { port, timeout }))
    }

    fn writer(&self) -> io::Result<Box<dyn DeviceWriter>> {
        let port = self.port.try_clone()?;
        Ok(Box::new(PortWriter { port }))
    }
}

pub struct PortReader {
    port: Box<dyn SerialPort>,
    timeout: Duration,
}

impl DeviceReader for PortReader {
    fn read_timeout(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<usize> {
        if self.timeout != timeout {
            self.port.set_timeout(timeout)?;
            self.timeout = timeout;
        }

        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::Interrupted) => Ok(0),
            Err(e) => Err(e),
        }
    }
}

pub struct PortWriter {
    port: Box<dyn SerialPort>,
}

impl DeviceWriter for PortWriter {
    fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        write_fully(self.port.as_mut(), data)
    }
}

/// Writes every byte of `data`, waiting out any number of write timeouts.
///
/// The port timeout is shared with the reader clone, so a write can time out
/// while the device is merely flow-controlled. Some backends report that as
/// `TimedOut` and others as an accepted length of zero; both mean "try again".
fn write_fully<W: Write + ?Sized>(port: &mut W, mut data: &[u8]) -> io::Result<()> {
    while !data.is_empty() {
        match port.write(data) {
            Ok(0) => {}
            Ok(n) => data = &data[n..],
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::Interrupted) => {}
            Err(e) => return Err(e),
        }
    }
    port.flush()
}

/// Ports without modem control lines (ptys, some USB bridges) reject the line
/// ioctls. The line is then left in the state the port was opened with.
fn modem_line(line: &str, result: serialport::Result<()>) -> serialport::Result<()> {
    match result {
        Err(e) if e.kind() == ErrorKind::Unknown => {
            debug!("{} line is not controllable on this port, left as opened: {}", line, e);
            Ok(())
        }
        other => other,
    }
}

fn unsupported(what: &str) -> serialport::Error {
    serialport::Error::new(
        ErrorKind::InvalidInput,
        format!("{} is not supported by this serial driver", what),
    )
}

/// Convert our DataBits to serialport crate's DataBits type
pub fn to_serialport_data_bits(bits: DataBits) -> serialport::DataBits {
    match bits {
        DataBits::Five => serialport::DataBits::Five,
        DataBits::Six => serialport::DataBits::Six,
        DataBits::Seven => serialport::DataBits::Seven,
        DataBits::Eight => serialport::DataBits::Eight,
    }
}

/// Convert our Parity to serialport crate's Parity type; mark and space have no equivalent.
pub fn to_serialport_parity(parity: Parity) -> serialport::Result<serialport::Parity> {
    match parity {
        Parity::None => Ok(serialport::Parity::None),
        Parity::Even => Ok(serialport::Parity::Even),
        Parity::Odd => Ok(serialport::Parity::Odd),
        Parity::Mark => Err(unsupported("mark parity")),
        Parity::Space => Err(unsupported("space parity")),
    }
}

pub fn to_serialport_stop_bits(bits: StopBits) -> serialport::StopBits {
    match bits {
        StopBits::One => serialport::StopBits::One,
        StopBits::Two => serialport::StopBits::Two,
    }
}
