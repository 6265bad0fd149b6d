pub mod aggregate;
pub mod customer;
pub mod lifecycle;

pub use aggregate::{
    BatchAssignDto, CustomerFieldsDto, DefectiveNoteDto, Order, OrderCaptureDto, OrderLineDto,
    OrderUpdateDto, PaymentStatusDto,
};
pub use customer::{group_customers, Customer, CustomerKey, CustomerUpdateDto};
pub use lifecycle::{LifecycleAction, LifecycleError, OrderLifecycle, Transition};
