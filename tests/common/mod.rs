#![allow(dead_code)]

use sercat::core::communication::{DeviceOpener, DeviceReader, DeviceWriter, SerialDevice};
use sercat::{SerialConfig, TimeoutPolicy};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// What the simulated device does on its next read.
pub enum ReadStep {
    Data(Vec<u8>),
    Idle,
    Fail,
    /// Fails once the host has written at least this many bytes.
    FailWhenWritten(usize),
}

/// Shared state of a simulated serial line.
#[derive(Clone, Default)]
pub struct MockLine {
    pub script: Arc<Mutex<VecDeque<ReadStep>>>,
    pub written: Arc<Mutex<Vec<u8>>>,
    pub write_calls: Arc<Mutex<usize>>,
    pub events: Arc<Mutex<Vec<String>>>,
}

impl MockLine {
    pub fn with_script(steps: Vec<ReadStep>) -> Self {
        let line = Self::default();
        *line.script.lock().unwrap() = steps.into();
        line
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn written(&self) -> Vec<u8> {
        self.written.lock().unwrap().clone()
    }

    fn record(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }
}

pub struct MockOpener {
    pub line: MockLine,
    pub fail_open: bool,
    pub fail_configure: bool,
}

impl MockOpener {
    pub fn new(line: MockLine) -> Self {
        Self {
            line,
            fail_open: false,
            fail_configure: false,
        }
    }
}

impl DeviceOpener for MockOpener {
    fn open(&self, device: &str) -> serialport::Result<Box<dyn SerialDevice>> {
        self.line.record(format!("open {}", device));
        if self.fail_open {
            return Err(serialport::Error::new(
                serialport::ErrorKind::NoDevice,
                "no such device",
            ));
        }
        Ok(Box::new(MockDevice {
            line: self.line.clone(),
            fail_configure: self.fail_configure,
        }))
    }
}

struct MockDevice {
    line: MockLine,
    fail_configure: bool,
}

impl SerialDevice for MockDevice {
    fn configure(&mut self, config: &SerialConfig) -> serialport::Result<()> {
        self.line
            .record(format!("configure {} {}", config.baud_rate(), config.framing()));
        if self.fail_configure {
            return Err(serialport::Error::new(
                serialport::ErrorKind::InvalidInput,
                "unsupported line settings",
            ));
        }
        Ok(())
    }

    fn set_timeouts(&mut self, _policy: &TimeoutPolicy) -> serialport::Result<()> {
        self.line.record("timeouts");
        Ok(())
    }

    fn reader(&self) -> io::Result<Box<dyn DeviceReader>> {
        Ok(Box::new(MockReader {
            line: self.line.clone(),
        }))
    }

    fn writer(&self) -> io::Result<Box<dyn DeviceWriter>> {
        Ok(Box::new(MockWriter {
            line: self.line.clone(),
        }))
    }
}

struct MockReader {
    line: MockLine,
}

impl DeviceReader for MockReader {
    fn read_timeout(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<usize> {
        let step = self.line.script.lock().unwrap().pop_front();
        match step {
            Some(ReadStep::Data(mut data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    let rest = data.split_off(n);
                    self.line.script.lock().unwrap().push_front(ReadStep::Data(rest));
                }
                Ok(n)
            }
            Some(ReadStep::Idle) => Ok(0),
            Some(ReadStep::Fail) => Err(io::Error::new(io::ErrorKind::BrokenPipe, "line dropped")),
            Some(ReadStep::FailWhenWritten(count)) => {
                let deadline = Instant::now() + Duration::from_secs(10);
                while self.line.written.lock().unwrap().len() < count && Instant::now() < deadline {
                    thread::sleep(Duration::from_millis(1));
                }
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "line dropped"))
            }
            None => {
                thread::sleep(timeout.min(Duration::from_millis(5)));
                Ok(0)
            }
        }
    }
}

struct MockWriter {
    line: MockLine,
}

impl DeviceWriter for MockWriter {
    fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        *self.line.write_calls.lock().unwrap() += 1;
        self.line.written.lock().unwrap().extend_from_slice(data);
        Ok(())
    }
}

/// Console output that can be inspected after the relay thread is gone.
#[derive(Clone, Default)]
pub struct SharedOutput(pub Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
