pub mod d400_customers;
pub mod d401_reports;
pub mod d402_analytics;
