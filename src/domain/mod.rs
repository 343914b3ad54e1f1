pub mod entry;
pub mod errors;
pub mod sheets;
pub mod timestamp;
