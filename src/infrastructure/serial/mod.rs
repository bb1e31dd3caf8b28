// Serial module - serialport-backed device and port naming
pub mod client;
pub mod naming;

pub use client::SerialPortOpener;
pub use naming::PortNaming;
