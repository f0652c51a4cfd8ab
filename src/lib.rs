pub mod commands;
pub mod jwt;
pub mod key;
pub mod parameters;
