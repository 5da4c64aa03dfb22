pub mod config;
pub mod errors;

pub mod database;
pub mod server;
pub mod services;
pub mod spreadsheet;
