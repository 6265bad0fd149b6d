pub mod cache;
pub mod changes;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod logger;
