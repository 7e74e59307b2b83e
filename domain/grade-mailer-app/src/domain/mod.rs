pub mod compose;
pub mod config;
pub mod message;
pub mod table;
