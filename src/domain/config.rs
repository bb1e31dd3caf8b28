use crate::domain::error::{SercatError, SercatResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BAUD_RATE: u32 = 115_200;
pub const DEFAULT_VERBOSITY: i32 = 1;

/// Number of data bits per character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

impl DataBits {
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '5' => Some(Self::Five),
            '6' => Some(Self::Six),
            '7' => Some(Self::Seven),
            '8' => Some(Self::Eight),
            _ => None,
        }
    }

    pub fn count(self) -> u8 {
        match self {
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
        }
    }
}

/// Parity configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    None,
    Even,
    Odd,
    Mark,
    Space,
}

impl Parity {
    /// Parses the case-insensitive parity letter of a framing string.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Self::None),
            'E' => Some(Self::Even),
            'O' => Some(Self::Odd),
            'M' => Some(Self::Mark),
            'S' => Some(Self::Space),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::None => 'N',
            Self::Even => 'E',
            Self::Odd => 'O',
            Self::Mark => 'M',
            Self::Space => 'S',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopBits {
    One,
    Two,
}

impl StopBits {
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Self::One),
            '2' => Some(Self::Two),
            _ => None,
        }
    }

    pub fn digit(self) -> char {
        match self {
            Self::One => '1',
            Self::Two => '2',
        }
    }
}

/// Byte size, parity and stop bits, always set together ("8N1").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framing {
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl Default for Framing {
    fn default() -> Self {
        Self {
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl FromStr for Framing {
    type Err = SercatError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = token.chars().collect();
        let [size, parity, stop] = chars[..] else {
            return Err(SercatError::invalid(
                token,
                "framing must be exactly three characters, e.g. 8N1",
            ));
        };

        let data_bits = DataBits::from_digit(size)
            .ok_or_else(|| SercatError::invalid(token, "byte size must be 5, 6, 7 or 8"))?;
        let parity = Parity::from_letter(parity)
            .ok_or_else(|| SercatError::invalid(token, "parity must be one of N, E, O, M, S"))?;
        let stop_bits = StopBits::from_digit(stop)
            .ok_or_else(|| SercatError::invalid(token, "stop bits must be 1 or 2"))?;

        Ok(Self {
            data_bits,
            parity,
            stop_bits,
        })
    }
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.data_bits.count(),
            self.parity.letter(),
            self.stop_bits.digit()
        )
    }
}

/// DTR line mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DtrControl {
    #[default]
    Enable,
    Disable,
    Handshake,
}

impl fmt::Display for DtrControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DtrControl::Enable => write!(f, "Enabled"),
            DtrControl::Disable => write!(f, "Disabled"),
            DtrControl::Handshake => write!(f, "Handshake"),
        }
    }
}

/// RTS line mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RtsControl {
    Enable,
    Disable,
    #[default]
    Handshake,
    Toggle,
}

impl fmt::Display for RtsControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtsControl::Enable => write!(f, "Enabled"),
            RtsControl::Disable => write!(f, "Disabled"),
            RtsControl::Handshake => write!(f, "Handshake"),
            RtsControl::Toggle => write!(f, "Toggle"),
        }
    }
}

/// Parses an unsigned integer with automatic base detection:
/// `0x`/`0X` prefix is hexadecimal, a leading `0` is octal, anything else decimal.
pub fn parse_number(token: &str) -> SercatResult<u32> {
    let (digits, radix) = if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        (hex, 16)
    } else if token.len() > 1 && token.starts_with('0') {
        (&token[1..], 8)
    } else {
        (token, 10)
    };

    // from_str_radix would accept a leading '+'
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(SercatError::invalid(token, "not a number"));
    }

    u32::from_str_radix(digits, radix).map_err(|e| SercatError::invalid(token, e.to_string()))
}

/// Validated, immutable description of the port and its line parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    port: u32,
    baud_rate: u32,
    framing: Framing,
    dtr: DtrControl,
    rts: RtsControl,
    verbosity: i32,
}

impl SerialConfig {
    pub fn builder() -> SerialConfigBuilder {
        SerialConfigBuilder::default()
    }

    pub fn port(&self) -> u32 {
        self.port
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    pub fn dtr(&self) -> DtrControl {
        self.dtr
    }

    pub fn rts(&self) -> RtsControl {
        self.rts
    }

    pub fn verbosity(&self) -> i32 {
        self.verbosity
    }
}

#[derive(Debug, Clone)]
pub struct SerialConfigBuilder {
    port: Option<u32>,
    baud_rate: u32,
    framing: Framing,
    dtr: DtrControl,
    rts: RtsControl,
    verbosity: i32,
}

impl Default for SerialConfigBuilder {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: DEFAULT_BAUD_RATE,
            framing: Framing::default(),
            dtr: DtrControl::default(),
            rts: RtsControl::default(),
            verbosity: DEFAULT_VERBOSITY,
        }
    }
}

impl SerialConfigBuilder {
    pub fn port(mut self, port: u32) -> Self {
        self.port = Some(port);
        self
    }

    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn dtr(mut self, dtr: DtrControl) -> Self {
        self.dtr = dtr;
        self
    }

    pub fn rts(mut self, rts: RtsControl) -> Self {
        self.rts = rts;
        self
    }

    pub fn verbosity(mut self, verbosity: i32) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn build(self) -> SercatResult<SerialConfig> {
        let port = match self.port {
            Some(port) if port > 0 => port,
            _ => return Err(SercatError::MissingPort),
        };
        if self.baud_rate == 0 {
            return Err(SercatError::invalid("0", "baud rate must be positive"));
        }

        Ok(SerialConfig {
            port,
            baud_rate: self.baud_rate,
            framing: self.framing,
            dtr: self.dtr,
            rts: self.rts,
            verbosity: self.verbosity,
        })
    }
}

/// Contents of the optional configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SercatConfig {
    /// Line defaults, overridden by command-line flags
    pub defaults: LineDefaults,
    /// Device naming
    pub device: DeviceSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baud_rate: Option<u32>,
    /// Three-character framing such as "7E1"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtr: Option<DtrControl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rts: Option<RtsControl>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSettings {
    /// Device name template using `{port}` or `{index}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_template: Option<String>,
}
