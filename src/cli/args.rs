use crate::domain::config::{
    parse_number, DtrControl, Framing, LineDefaults, RtsControl, SerialConfig, DEFAULT_VERBOSITY,
};
use crate::domain::error::{SercatError, SercatResult};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Command line arguments for SerCat
///
/// Numbers accept decimal, `0x` hexadecimal and leading-`0` octal. For each
/// of DTR and RTS the last mode flag given wins.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "sercat",
    version = env!("CARGO_PKG_VERSION"),
    about = "Minimal serial port terminal: device to stdout, stdin to device",
    long_about = "Opens a serial port and relays bytes in both directions between the device and \
                  this process's console until it is killed. Received bytes go to stdout \
                  unmodified; keystrokes are sent raw. Diagnostics go to stderr.",
    args_override_self = true
)]
pub struct Args {
    /// Port number (COM<n> on Windows, /dev/ttyS<n-1> elsewhere)
    #[arg(value_name = "PORT")]
    pub port: Option<String>,

    /// Baud rate (default 115200)
    #[arg(short, long, value_name = "BAUD")]
    pub baud: Option<String>,

    /// Byte size, parity and stop bits, e.g. 7E1 (default 8N1)
    #[arg(short, long, value_name = "FRAMING")]
    pub parity: Option<String>,

    /// Increase verbosity (repeatable)
    // clap counts into a u8, so occurrences past 255 saturate
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// DTR enabled (default)
    #[arg(long = "dtr-on", overrides_with_all = ["dtr_off", "dtr_handshake"])]
    pub dtr_on: bool,

    /// DTR disabled
    #[arg(long = "dtr-off", overrides_with_all = ["dtr_on", "dtr_handshake"])]
    pub dtr_off: bool,

    /// DTR handshake
    #[arg(long = "dtr-handshake", overrides_with_all = ["dtr_on", "dtr_off"])]
    pub dtr_handshake: bool,

    /// RTS enabled
    #[arg(long = "rts-on", overrides_with_all = ["rts_off", "rts_handshake", "rts_toggle"])]
    pub rts_on: bool,

    /// RTS disabled
    #[arg(long = "rts-off", overrides_with_all = ["rts_on", "rts_handshake", "rts_toggle"])]
    pub rts_off: bool,

    /// RTS handshake (default)
    #[arg(long = "rts-handshake", overrides_with_all = ["rts_on", "rts_off", "rts_toggle"])]
    pub rts_handshake: bool,

    /// RTS toggle
    #[arg(long = "rts-toggle", overrides_with_all = ["rts_on", "rts_off", "rts_handshake"])]
    pub rts_toggle: bool,

    /// Configuration file (default ~/.config/sercat/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Starts at 1; each -v adds one and each -q takes one away.
    pub fn verbosity(&self) -> i32 {
        DEFAULT_VERBOSITY + i32::from(self.verbose) - i32::from(self.quiet)
    }

    pub fn dtr(&self) -> Option<DtrControl> {
        if self.dtr_on {
            Some(DtrControl::Enable)
        } else if self.dtr_off {
            Some(DtrControl::Disable)
        } else if self.dtr_handshake {
            Some(DtrControl::Handshake)
        } else {
            None
        }
    }

    pub fn rts(&self) -> Option<RtsControl> {
        if self.rts_on {
            Some(RtsControl::Enable)
        } else if self.rts_off {
            Some(RtsControl::Disable)
        } else if self.rts_handshake {
            Some(RtsControl::Handshake)
        } else if self.rts_toggle {
            Some(RtsControl::Toggle)
        } else {
            None
        }
    }

    /// Builds the validated configuration. Flags win over file defaults.
    pub fn to_config(&self, defaults: &LineDefaults) -> SercatResult<SerialConfig> {
        let port = match self.port.as_deref() {
            Some(token) => parse_number(token)?,
            None => return Err(SercatError::MissingPort),
        };
        let mut builder = SerialConfig::builder()
            .port(port)
            .verbosity(self.verbosity());

        if let Some(baud) = self.baud.as_deref() {
            builder = builder.baud_rate(parse_number(baud)?);
        } else if let Some(baud) = defaults.baud_rate {
            builder = builder.baud_rate(baud);
        }

        if let Some(framing) = self.parity.as_deref().or(defaults.framing.as_deref()) {
            builder = builder.framing(framing.parse::<Framing>()?);
        }
        if let Some(dtr) = self.dtr().or(defaults.dtr) {
            builder = builder.dtr(dtr);
        }
        if let Some(rts) = self.rts().or(defaults.rts) {
            builder = builder.rts(rts);
        }

        builder.build()
    }
}

/// Renders a configuration back into flags that parse to the same value.
pub fn config_to_args(config: &SerialConfig) -> Vec<String> {
    let mut args = vec![
        "sercat".to_string(),
        config.port().to_string(),
        "--baud".to_string(),
        config.baud_rate().to_string(),
        "--parity".to_string(),
        config.framing().to_string(),
    ];

    args.push(
        match config.dtr() {
            DtrControl::Enable => "--dtr-on",
            DtrControl::Disable => "--dtr-off",
            DtrControl::Handshake => "--dtr-handshake",
        }
        .to_string(),
    );
    args.push(
        match config.rts() {
            RtsControl::Enable => "--rts-on",
            RtsControl::Disable => "--rts-off",
            RtsControl::Handshake => "--rts-handshake",
            RtsControl::Toggle => "--rts-toggle",
        }
        .to_string(),
    );

    let delta = config.verbosity() - DEFAULT_VERBOSITY;
    let flag = if delta > 0 { "-v" } else { "-q" };
    args.extend(std::iter::repeat(flag.to_string()).take(delta.unsigned_abs() as usize));
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("sercat").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["3"]).to_config(&LineDefaults::default()).unwrap();
        assert_eq!(config.port(), 3);
        assert_eq!(config.baud_rate(), 115_200);
        assert_eq!(config.framing().to_string(), "8N1");
        assert_eq!(config.dtr(), DtrControl::Enable);
        assert_eq!(config.rts(), RtsControl::Handshake);
        assert_eq!(config.verbosity(), 1);
    }

    #[test]
    fn test_verbosity_counts() {
        let args = parse(&["1", "-v", "-v", "-v", "-q"]);
        assert_eq!(args.verbosity(), 3);

        let args = parse(&["1", "-qqq"]);
        assert_eq!(args.verbosity(), -2);
    }

    #[test]
    fn test_verbosity_count_saturates() {
        let flags = format!("-{}", "v".repeat(300));
        let args = parse(&["1", &flags]);
        assert_eq!(args.verbose, u8::MAX);
        assert_eq!(args.verbosity(), 256);

        let flags = format!("-{}", "q".repeat(300));
        assert_eq!(parse(&["1", &flags]).verbosity(), -254);
    }

    #[test]
    fn test_last_line_flag_wins() {
        let args = parse(&["1", "--dtr-off", "--dtr-handshake", "--dtr-on"]);
        assert_eq!(args.dtr(), Some(DtrControl::Enable));

        let args = parse(&["1", "--rts-toggle", "--rts-off"]);
        assert_eq!(args.rts(), Some(RtsControl::Disable));

        let args = parse(&["1", "--rts-on", "--rts-on"]);
        assert_eq!(args.rts(), Some(RtsControl::Enable));
    }

    #[test]
    fn test_hex_port_and_baud() {
        let config = parse(&["0x10", "-b", "0x2580", "-p", "7o2"])
            .to_config(&LineDefaults::default())
            .unwrap();
        assert_eq!(config.port(), 16);
        assert_eq!(config.baud_rate(), 9600);
        assert_eq!(config.framing().to_string(), "7O2");
    }

    #[test]
    fn test_missing_or_zero_port() {
        let defaults = LineDefaults::default();
        assert!(matches!(parse(&[]).to_config(&defaults), Err(SercatError::MissingPort)));
        assert!(matches!(parse(&["0"]).to_config(&defaults), Err(SercatError::MissingPort)));
        assert!(matches!(
            parse(&["COM3"]).to_config(&defaults),
            Err(SercatError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_bad_framing_is_usage_error() {
        let error = parse(&["1", "--parity", "8N"])
            .to_config(&LineDefaults::default())
            .unwrap_err();
        assert!(error.is_usage());
        assert!(error.to_string().contains("8N"));
    }

    #[test]
    fn test_file_defaults_yield_to_flags() {
        let defaults = LineDefaults {
            baud_rate: Some(9600),
            framing: Some("7E1".to_string()),
            dtr: Some(DtrControl::Disable),
            rts: Some(RtsControl::Enable),
        };

        let config = parse(&["2", "-b", "57600", "--rts-off"]).to_config(&defaults).unwrap();
        assert_eq!(config.baud_rate(), 57_600);
        assert_eq!(config.framing().to_string(), "7E1");
        assert_eq!(config.dtr(), DtrControl::Disable);
        assert_eq!(config.rts(), RtsControl::Disable);
    }

    #[test]
    fn test_config_to_args_reparses() {
        let config = parse(&["7", "-b", "300", "-p", "5s2", "--dtr-handshake", "--rts-toggle", "-qq"])
            .to_config(&LineDefaults::default())
            .unwrap();

        let reparsed = Args::try_parse_from(config_to_args(&config))
            .unwrap()
            .to_config(&LineDefaults::default())
            .unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Args::try_parse_from(["sercat", "1", "--stop-bits", "2"]).is_err());
    }
}
