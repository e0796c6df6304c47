use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-user preferences for the command-line front end. Scoring never reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub notifications: bool,
    /// Append every result to history.
    pub autosave: bool,
    pub spam_check: bool,
    pub dns_check: bool,
    pub disposable_check: bool,
    pub save_previous: bool,
    /// Stored for compatibility; nothing uses it.
    pub api_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            autosave: true,
            spam_check: true,
            dns_check: true,
            disposable_check: true,
            save_previous: true,
            api_key: String::new(),
        }
    }
}

impl Settings {
    pub const KEYS: [&'static str; 7] = [
        "notifications",
        "autosave",
        "spamCheck",
        "dnsCheck",
        "disposableCheck",
        "savePrevious",
        "apiKey",
    ];

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;
        log::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Update one field by its camelCase name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if key == "apiKey" {
            self.api_key = value.to_string();
            return Ok(());
        }

        let flag = match key {
            "notifications" => &mut self.notifications,
            "autosave" => &mut self.autosave,
            "spamCheck" => &mut self.spam_check,
            "dnsCheck" => &mut self.dns_check,
            "disposableCheck" => &mut self.disposable_check,
            "savePrevious" => &mut self.save_previous,
            _ => bail!(
                "Unknown setting '{}' (expected one of: {})",
                key,
                Self::KEYS.join(", ")
            ),
        };
        *flag = match value.trim().to_lowercase().as_str() {
            "true" | "on" | "yes" => true,
            "false" | "off" | "no" => false,
            other => bail!("Setting '{}' expects true or false, got '{}'", key, other),
        };
        Ok(())
    }

    /// Whether an address check should be displayed. Only the list-backed
    /// checks can be hidden.
    pub fn shows_address_check(&self, check: &str) -> bool {
        match check {
            "dns" => self.dns_check,
            "disposable" => self.disposable_check,
            "spam" => self.spam_check,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.autosave);
        assert_eq!(settings.api_key, "");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/settings.json");

        let mut settings = Settings::default();
        settings.set("autosave", "false").unwrap();
        settings.set("apiKey", "abc123").unwrap();
        settings.save(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"disposableCheck\": true"));
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"dnsCheck": false}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert!(!settings.dns_check);
        assert!(settings.spam_check);
        assert!(!settings.shows_address_check("dns"));
        assert!(settings.shows_address_check("format"));
    }

    #[test]
    fn test_set_validation() {
        let mut settings = Settings::default();

        settings.set("spamCheck", "OFF").unwrap();
        assert!(!settings.spam_check);

        let err = settings.set("darkMode", "true").unwrap_err();
        assert!(err.to_string().contains("Unknown setting 'darkMode'"));

        let err = settings.set("autosave", "maybe").unwrap_err();
        assert!(err.to_string().contains("expects true or false"));
        assert!(settings.autosave);
    }
}
