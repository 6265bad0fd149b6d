pub mod a001_order;
pub mod a002_trash_order;
pub mod a003_reference_data;
pub mod changes;
pub mod d400_customers;
pub mod d401_reports;
pub mod d402_analytics;
pub mod logs;
pub mod public;
