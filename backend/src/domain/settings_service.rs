//! User settings: display language, currency and dashboard feature flags.

use anyhow::Result;
use log::info;
use shared::{Currency, DashboardFeatures, Language, UserSettings};
use std::sync::Arc;

use crate::storage::{Connection, SettingsStorage};

#[derive(Clone)]
pub struct SettingsService<C: Connection> {
    settings_repository: C::SettingsRepository,
}

impl<C: Connection> SettingsService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            settings_repository: connection.create_settings_repository(),
        }
    }

    pub fn get_settings(&self) -> Result<UserSettings> {
        self.settings_repository.get_settings()
    }

    /// Change any of language, currency or features; `None` leaves a value as is
    pub fn update_settings(
        &self,
        language: Option<Language>,
        currency: Option<Currency>,
        features: Option<DashboardFeatures>,
    ) -> Result<UserSettings> {
        let mut settings = self.settings_repository.get_settings()?;
        if let Some(language) = language {
            settings.language = language;
        }
        if let Some(currency) = currency {
            settings.currency = currency;
        }
        if let Some(features) = features {
            info!("Dashboard features now {:?}", features);
            settings.features = features;
        }
        self.settings_repository.update_settings(&settings)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;

    #[test]
    fn test_partial_update_keeps_other_values() {
        let env = TestEnvironment::new().unwrap();
        let service = SettingsService::new(env.shared_connection());

        service.update_settings(Some(Language::De), None, None).unwrap();
        let settings = service.update_settings(None, Some(Currency::Jpy), None).unwrap();

        assert_eq!(settings.language, Language::De);
        assert_eq!(settings.currency, Currency::Jpy);
        assert_eq!(service.get_settings().unwrap(), settings);
    }
}
