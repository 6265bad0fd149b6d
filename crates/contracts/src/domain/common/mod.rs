//! Common types and traits for all aggregates

pub mod aggregate_root;
pub mod entity_metadata;
pub mod reference_item;
pub mod validation;

// Re-exports
pub use aggregate_root::AggregateRoot;
pub use entity_metadata::EntityMetadata;
pub use reference_item::{PublicOptions, ReferenceItem, ReferenceItemDto, ReferenceKind};
pub use validation::{require_text, ValidationError};
