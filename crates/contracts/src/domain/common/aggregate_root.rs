use super::EntityMetadata;

/// Trait for aggregate roots
///
/// Instance accessors plus static naming metadata shared by repositories,
/// the activity log and change notifications.
pub trait AggregateRoot {
    /// Identifier type of the aggregate
    type Id;

    // ============================================================================
    // Instance methods
    // ============================================================================

    /// Record identifier
    fn id(&self) -> Self::Id;

    /// Lifecycle timestamps
    fn metadata(&self) -> &EntityMetadata;

    /// Mutable lifecycle timestamps
    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ============================================================================
    // Static aggregate metadata
    // ============================================================================

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Table name (e.g. "orders")
    fn collection_name() -> &'static str;

    /// Singular display name (e.g. "Order")
    fn element_name() -> &'static str;

    /// Plural display name (e.g. "Orders")
    fn list_name() -> &'static str;

    /// Full system name (e.g. "a001_orders")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
