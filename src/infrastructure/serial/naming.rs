/// Maps numeric port identifiers onto platform device names.
///
/// A template may use `{port}` for the number as given and `{index}` for the
/// zero-based number (`port - 1`), so COM1 and `/dev/ttyS0` name the same port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortNaming {
    template: String,
}

#[cfg(windows)]
const PLATFORM_TEMPLATE: &str = "COM{port}";

#[cfg(not(windows))]
const PLATFORM_TEMPLATE: &str = "/dev/ttyS{index}";

impl PortNaming {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn platform() -> Self {
        Self::new(PLATFORM_TEMPLATE)
    }

    pub fn device_name(&self, port: u32) -> String {
        self.template
            .replace("{port}", &port.to_string())
            .replace("{index}", &port.saturating_sub(1).to_string())
    }
}

impl Default for PortNaming {
    fn default() -> Self {
        Self::platform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_placeholders() {
        let naming = PortNaming::new("/dev/ttyUSB{index}");
        assert_eq!(naming.device_name(1), "/dev/ttyUSB0");
        assert_eq!(naming.device_name(12), "/dev/ttyUSB11");

        let naming = PortNaming::new("COM{port}");
        assert_eq!(naming.device_name(3), "COM3");
    }

    #[test]
    fn test_platform_convention() {
        let name = PortNaming::platform().device_name(1);
        if cfg!(windows) {
            assert_eq!(name, "COM1");
        } else {
            assert_eq!(name, "/dev/ttyS0");
        }
    }

    #[test]
    fn test_template_without_placeholder() {
        let naming = PortNaming::new("/dev/pts/7");
        assert_eq!(naming.device_name(4), "/dev/pts/7");
    }
}
