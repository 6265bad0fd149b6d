pub mod a001_order;
pub mod a002_trash_order;
pub mod common;
