// Console module - Raw keyboard input for the outbound relay
use crate::domain::error::{SercatError, SercatResult};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, IsTerminal};
use tracing::{debug, warn};

/// Keeps the console in raw mode (no line editing, no echo) while alive.
///
/// Does nothing when standard input is not a terminal, so piped input passes
/// through as-is.
pub struct RawConsole {
    active: bool,
}

impl RawConsole {
    pub fn enable() -> SercatResult<Self> {
        if !io::stdin().is_terminal() {
            debug!("stdin is not a terminal, leaving console mode alone");
            return Ok(Self { active: false });
        }

        enable_raw_mode().map_err(|e| SercatError::io("enabling raw console mode", e))?;
        Ok(Self { active: true })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for RawConsole {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = disable_raw_mode() {
                warn!("Failed to restore console mode: {}", e);
            }
        }
    }
}
