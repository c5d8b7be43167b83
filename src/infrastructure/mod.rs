pub mod config;
pub mod export;
pub mod identity;
pub mod persistence;
