use crate::domain::config::SercatConfig;
use crate::domain::error::{SercatError, SercatResult};
use crate::infrastructure::serial::PortNaming;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration manager
///
/// Looks for an explicit `--config` file, otherwise for
/// `~/.config/sercat/config.toml`. Only an explicit file has to exist.
pub struct ConfigManager {
    config_path: Option<PathBuf>,
    explicit: bool,
}

impl ConfigManager {
    pub fn new(explicit_path: Option<&Path>) -> Self {
        match explicit_path {
            Some(path) => Self {
                config_path: Some(path.to_path_buf()),
                explicit: true,
            },
            None => Self {
                config_path: Self::get_global_config_path(),
                explicit: false,
            },
        }
    }

    /// Load configuration, falling back to defaults when no file applies
    pub fn load_config(&self) -> SercatResult<SercatConfig> {
        match &self.config_path {
            Some(path) if self.explicit || path.exists() => Self::load_config_from_path(path),
            _ => Ok(SercatConfig::default()),
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(path: &Path) -> SercatResult<SercatConfig> {
        let content = fs::read_to_string(path).map_err(|e| SercatError::ConfigFile {
            path: path.to_path_buf(),
            message: format!("failed to read: {}", e),
        })?;

        toml::from_str(&content).map_err(|e| SercatError::ConfigFile {
            path: path.to_path_buf(),
            message: format!("failed to parse: {}", e),
        })
    }

    fn get_global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("sercat").join("config.toml"))
    }
}

/// Device naming from the file's template, or the platform convention.
pub fn port_naming(config: &SercatConfig) -> PortNaming {
    config
        .device
        .name_template
        .as_deref()
        .map(PortNaming::new)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::DtrControl;
    use tempfile::TempDir;

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[defaults]\nbaud_rate = 9600\ndtr = \"disable\"\n\n[device]\nname_template = \"/dev/ttyUSB{index}\"\n",
        )
        .unwrap();

        let config = ConfigManager::new(Some(&path)).load_config().unwrap();
        assert_eq!(config.defaults.baud_rate, Some(9600));
        assert_eq!(config.defaults.dtr, Some(DtrControl::Disable));
        assert_eq!(port_naming(&config).device_name(1), "/dev/ttyUSB0");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::new(Some(&dir.path().join("absent.toml")));

        let error = manager.load_config().unwrap_err();
        assert!(matches!(error, SercatError::ConfigFile { .. }));
        assert!(error.is_usage());
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults]\nbaud_rate = \"fast\"\n").unwrap();

        assert!(ConfigManager::load_config_from_path(&path).is_err());
    }

    #[test]
    fn test_default_naming_without_template() {
        assert_eq!(port_naming(&SercatConfig::default()), PortNaming::platform());
    }
}
