pub mod config;
pub mod database;
pub mod query;
pub mod upstream;
