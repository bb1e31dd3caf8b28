// Core module - Session lifecycle and duplex relays
pub mod communication;
pub mod session;
