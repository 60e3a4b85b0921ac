pub mod api_utils;
pub mod components;
pub mod config;
pub mod icons;
pub mod list_page;
pub mod list_utils;
pub mod modal;
pub mod record_manager;
