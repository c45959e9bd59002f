use std::fs;
use std::path::Path;
use std::time::Duration;

use console_logging::{console_info, console_warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ConsoleSettings {
    pub base_url: String,
    pub include_forks: bool,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            include_forks: true,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl ConsoleSettings {
    pub(crate) fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Loads settings from a RON file, falling back to defaults when the file
/// is missing or unreadable.
pub(crate) fn load(path: &Path) -> ConsoleSettings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ConsoleSettings::default();
        }
        Err(err) => {
            console_warn!("Failed to read settings from {:?}: {}", path, err);
            return ConsoleSettings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            console_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            console_warn!("Failed to parse settings from {:?}: {}", path, err);
            ConsoleSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = load(&dir.path().join("absent.ron"));
        assert_eq!(settings, ConsoleSettings::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("admin_console.ron");
        let mut file = fs::File::create(&path).expect("create");
        write!(file, "(base_url: \"http://example.com/api\")").expect("write");

        let settings = load(&path);
        assert_eq!(settings.base_url, "http://example.com/api");
        assert_eq!(settings.include_forks, ConsoleSettings::default().include_forks);
    }

    #[test]
    fn unparseable_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("admin_console.ron");
        fs::write(&path, "not ron at all {{{").expect("write");

        assert_eq!(load(&path), ConsoleSettings::default());
    }
}
