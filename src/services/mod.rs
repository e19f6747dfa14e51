pub mod api_client;
pub mod auth_service;
pub mod content_service;
pub mod form_service;
pub mod notification_service;
pub mod panel_service;
pub mod search_service;
pub mod site_api;
