pub mod payment_status;
pub mod size;

pub use payment_status::PaymentStatus;
pub use size::{compare_sizes, size_rank, SIZE_ORDER};
