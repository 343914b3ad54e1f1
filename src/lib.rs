//! Records attendance start and stop times in a monthly Google Sheets table.

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod ports;
