pub mod changes;
pub mod logger;
pub mod pagination;
