//! Settings adapter. Serves application-wide values from loaded configuration.

use crate::domain::DomainError;
use crate::ports::SettingsPort;

/// Settings fixed at startup.
pub struct StaticSettings {
    base_url: Option<String>,
}

impl StaticSettings {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }
}

#[async_trait::async_trait]
impl SettingsPort for StaticSettings {
    async fn base_url(&self) -> Result<Option<String>, DomainError> {
        Ok(self.base_url.clone())
    }
}
