use std::sync::Arc;

use crate::config::AppConfig;
use crate::directory::StaffDirectory;
use crate::error::AppError;
use crate::rest::{RestClient, RestError};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// `None` when the data service connection settings are missing.
    pub directory: Option<Arc<dyn StaffDirectory>>,
}

impl AppState {
    /// Build the state once at startup, connecting to the data service when
    /// its settings are present.
    pub fn from_config(config: AppConfig) -> Result<Self, RestError> {
        let directory = match config.data_service.credentials() {
            Some((url, key)) => {
                Some(Arc::new(RestClient::new(url, key)?) as Arc<dyn StaffDirectory>)
            }
            None => None,
        };

        Ok(Self { config, directory })
    }

    /// The data service, or a configuration error when it is not set up.
    pub fn directory(&self) -> Result<&dyn StaffDirectory, AppError> {
        self.directory.as_deref().ok_or_else(|| {
            AppError::Misconfigured("data service URL or service-role key is not set".into())
        })
    }

    /// Whether error responses may carry data service diagnostics.
    pub fn expose_details(&self) -> bool {
        !self.config.server.is_production()
    }
}
