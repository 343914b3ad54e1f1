pub mod authorizer;
pub mod command_handler;
