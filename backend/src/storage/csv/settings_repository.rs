//! # Settings Repository
//!
//! Stores [`UserSettings`] in `settings.yaml` at the root of the data
//! directory.
//!
//! ```yaml
//! language: en
//! currency: INR
//! features:
//!   search: true
//!   filter: true
//!   sort: true
//!   export: false
//! ```

use anyhow::{Context, Result};
use log::{debug, info};
use shared::UserSettings;
use std::fs;

use super::connection::CsvConnection;
use crate::storage::traits::SettingsStorage;

#[derive(Clone)]
pub struct SettingsRepository {
    connection: CsvConnection,
}

impl SettingsRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn save_settings(&self, settings: &UserSettings) -> Result<()> {
        let settings_path = self.connection.settings_file_path();
        let yaml_content = serde_yaml::to_string(settings)?;

        let temp_path = settings_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &settings_path)?;

        debug!("Saved settings to {}", settings_path.display());
        Ok(())
    }
}

impl SettingsStorage for SettingsRepository {
    fn get_settings(&self) -> Result<UserSettings> {
        let settings_path = self.connection.settings_file_path();

        if !settings_path.exists() {
            let settings = UserSettings::default();
            self.save_settings(&settings)?;
            info!("Created default settings at {}", settings_path.display());
            return Ok(settings);
        }

        let yaml_content = fs::read_to_string(&settings_path)?;
        let settings = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid settings file {}", settings_path.display()))?;
        Ok(settings)
    }

    fn update_settings(&self, settings: &UserSettings) -> Result<()> {
        self.save_settings(settings)?;
        info!(
            "Updated settings: language={}, currency={}",
            settings.language.code(),
            settings.currency.code()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use shared::{Currency, Language};

    #[test]
    fn test_defaults_are_created_on_first_read() {
        let env = TestEnvironment::new().unwrap();
        let repo = SettingsRepository::new(env.connection.clone());

        let settings = repo.get_settings().unwrap();

        assert_eq!(settings, UserSettings::default());
        assert!(env.connection.settings_file_path().exists());
    }

    #[test]
    fn test_update_and_reload() {
        let env = TestEnvironment::new().unwrap();
        let repo = SettingsRepository::new(env.connection.clone());

        let mut settings = repo.get_settings().unwrap();
        settings.currency = Currency::Inr;
        settings.language = Language::Fr;
        settings.features.export = false;
        repo.update_settings(&settings).unwrap();

        assert_eq!(repo.get_settings().unwrap(), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let env = TestEnvironment::new().unwrap();
        fs::write(env.connection.settings_file_path(), "currency: GBP\n").unwrap();
        let repo = SettingsRepository::new(env.connection.clone());

        let settings = repo.get_settings().unwrap();
        assert_eq!(settings.currency, Currency::Gbp);
        assert!(settings.features.search);
    }
}
