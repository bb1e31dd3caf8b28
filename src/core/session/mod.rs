// Session module - Device session lifecycle
pub mod manager;
pub mod session;

pub use manager::SessionManager;
pub use session::{DeviceSession, TimeoutPolicy};
