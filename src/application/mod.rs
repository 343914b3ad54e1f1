pub mod credentials;
pub mod service;
pub mod update;
