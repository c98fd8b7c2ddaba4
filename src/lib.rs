pub mod config;
pub mod evolution;
