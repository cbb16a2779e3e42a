use std::sync::Arc;

use crate::clients::NeoClient;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub neo_client: Arc<NeoClient>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, crate::domain::ApiError> {
        Ok(Self {
            neo_client: Arc::new(NeoClient::new(&config)?),
            config,
        })
    }
}
