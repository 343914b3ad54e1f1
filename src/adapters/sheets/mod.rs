pub mod auth;
pub mod first_column;
pub mod http_client;
pub mod spreadsheet_manager;
pub mod spreadsheet_read;
pub mod spreadsheet_write;
pub mod token_store;
pub mod value_range_factory;
