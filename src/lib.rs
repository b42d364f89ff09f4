pub mod config;
pub mod error;
pub mod fetch;
pub mod forecast;
pub mod infra;
pub mod locations;
pub mod output;
pub mod parser;
pub mod server;
pub mod services;
