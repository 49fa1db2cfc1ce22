pub mod chat_handler;
pub mod command;
