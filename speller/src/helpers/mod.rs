pub mod config;
pub mod database;
pub mod tokenizer;
pub mod upstream;
