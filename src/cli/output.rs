use crate::cli::args::Args;
use crate::domain::config::SerialConfig;
use crate::infrastructure::logging::Diagnostics;
use clap::CommandFactory;

/// Startup banner and line settings, gated by verbosity.
pub fn header_lines(config: &SerialConfig) -> Vec<(i32, String)> {
    vec![
        (1, format!("SerCat {}", env!("CARGO_PKG_VERSION"))),
        (
            2,
            format!(
                "Bitrate: {:<6}  Parity: {}",
                config.baud_rate(),
                config.framing()
            ),
        ),
        (2, format!("DTR: {}", config.dtr())),
        (2, format!("RTS: {}", config.rts())),
    ]
}

pub fn write_header(config: &SerialConfig, diagnostics: &Diagnostics) {
    for (level, line) in header_lines(config) {
        diagnostics.emit(level, line);
    }
}

/// Usage text shown with every usage error, regardless of verbosity.
pub fn usage_text() -> String {
    Args::command().render_help().to_string()
}

pub fn write_usage() {
    eprintln!("{}", usage_text());
}
