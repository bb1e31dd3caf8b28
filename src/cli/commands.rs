use crate::cli::args::Args;
use crate::cli::output::write_header;
use crate::core::communication::{DeviceOpener, DuplexEngine};
use crate::core::session::{DeviceSession, SessionManager};
use crate::domain::config::SercatConfig;
use crate::domain::error::SercatResult;
use crate::infrastructure::config::{port_naming, ConfigManager};
use crate::infrastructure::console::RawConsole;
use crate::infrastructure::logging::Diagnostics;
use crate::infrastructure::serial::SerialPortOpener;
use std::io;

/// Execute the bridge: configure, open the port, then relay until failure.
pub async fn execute_command(args: Args) -> SercatResult<()> {
    let file_config = ConfigManager::new(args.config.as_deref()).load_config()?;
    let (session, diagnostics) = start_session(&args, &file_config, SerialPortOpener)?;

    let console = RawConsole::enable()?;
    diagnostics.emit(
        2,
        format!("console raw mode {}", if console.is_active() { "on" } else { "off" }),
    );

    DuplexEngine::new(session, diagnostics)
        .run(io::stdin(), io::stdout())
        .await
}

/// Validates the arguments and establishes the device session.
///
/// Nothing is opened unless the whole configuration is valid.
pub fn start_session<O: DeviceOpener>(
    args: &Args,
    file_config: &SercatConfig,
    opener: O,
) -> SercatResult<(DeviceSession, Diagnostics)> {
    let config = args.to_config(&file_config.defaults)?;
    let diagnostics = Diagnostics::new(config.verbosity());
    write_header(&config, &diagnostics);

    let manager = SessionManager::new(opener, port_naming(file_config), diagnostics);
    let session = manager.establish(config)?;
    Ok((session, diagnostics))
}
