pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    api_client::{HttpTransport, Transport},
    auth_service::AdminAuthService,
    site_api::SiteApi,
};

#[derive(Clone)]
pub struct AppState {
    pub api: SiteApi,
    pub auth: AdminAuthService,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config.api_base_url.clone(), config.request_timeout)?;
        let auth = AdminAuthService::new(
            config.admin_email.clone(),
            config.admin_password_hash.clone(),
        );
        Ok(Self::with_transport(Arc::new(transport), auth))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, auth: AdminAuthService) -> Self {
        Self {
            api: SiteApi::new(transport),
            auth,
        }
    }
}
