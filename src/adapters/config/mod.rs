pub mod app_config;
pub mod paths;
