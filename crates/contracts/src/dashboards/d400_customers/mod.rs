pub mod dto;

pub use dto::{CustomerFilter, CustomerPage, FilterOptions, ALL};
