use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub verbose: bool,
    pub record_history: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("fairdice"),
            verbose: false,
            record_history: true,
        }
    }
}

impl CliConfig {
    pub fn new(data_dir: Option<PathBuf>, verbose: bool, no_history: bool) -> Self {
        let mut config = Self::default();
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        config.verbose = verbose;
        config.record_history = !no_history;
        config
    }

    /// `EnvFilter` directive for the chosen verbosity
    pub fn log_filter(&self) -> String {
        let level = if self.verbose { "debug" } else { "warn" };
        format!("fairdice={},fairdice_core={}", level, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let config = CliConfig::new(Some(PathBuf::from("/tmp/dice")), true, true);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/dice"));
        assert!(!config.record_history);
        assert_eq!(config.log_filter(), "fairdice=debug,fairdice_core=debug");
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::new(None, false, false);
        assert!(config.data_dir.ends_with("fairdice"));
        assert!(config.record_history);
        assert!(config.log_filter().contains("warn"));
    }
}
