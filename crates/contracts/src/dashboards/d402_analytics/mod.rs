pub mod dto;

pub use dto::{DesignShare, TopCustomer};
