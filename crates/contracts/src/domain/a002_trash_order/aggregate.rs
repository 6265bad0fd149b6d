use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_order::Order;
use crate::domain::common::{AggregateRoot, EntityMetadata};
use crate::enums::PaymentStatus;

/// Soft-deleted copy of an order, kept until restored or purged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashOrder {
    pub id: i64,
    /// Id the order had in the orders table; reused on restore
    pub original_id: i64,

    pub name: String,
    pub phone: String,
    pub facebook: String,
    pub chapter: String,
    pub address: String,

    pub color: String,
    pub size: String,
    pub design: String,
    pub note: Option<String>,
    pub quantity: i32,

    pub price: f64,
    pub payment_status: PaymentStatus,

    pub batch: Option<String>,
    pub batch_folder: Option<String>,

    pub deleted_at: DateTime<Utc>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl TrashOrder {
    /// Copy of `order` ready to insert into the trash table (id = 0)
    pub fn from_order(order: &Order, deleted_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            original_id: order.id,
            name: order.name.clone(),
            phone: order.phone.clone(),
            facebook: order.facebook.clone(),
            chapter: order.chapter.clone(),
            address: order.address.clone(),
            color: order.color.clone(),
            size: order.size.clone(),
            design: order.design.clone(),
            note: order.note.clone(),
            quantity: order.quantity,
            price: order.price,
            payment_status: order.payment_status,
            batch: order.batch.clone(),
            batch_folder: order.batch_folder.clone(),
            deleted_at,
            metadata: EntityMetadata {
                created_at: order.metadata.created_at,
                updated_at: deleted_at,
            },
        }
    }

    /// Active order rebuilt from this trash row, keeping the original id
    pub fn to_restored_order(&self) -> Order {
        Order {
            id: self.original_id,
            name: self.name.clone(),
            phone: self.phone.clone(),
            facebook: self.facebook.clone(),
            chapter: self.chapter.clone(),
            address: self.address.clone(),
            color: self.color.clone(),
            size: self.size.clone(),
            design: self.design.clone(),
            note: self.note.clone(),
            quantity: self.quantity,
            price: self.price,
            payment_status: self.payment_status,
            is_defective: false,
            defective_note: None,
            batch: self.batch.clone(),
            batch_folder: self.batch_folder.clone(),
            metadata: EntityMetadata::new(),
        }
    }
}

impl AggregateRoot for TrashOrder {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "trash_orders"
    }

    fn element_name() -> &'static str {
        "Trashed order"
    }

    fn list_name() -> &'static str {
        "Trash"
    }
}
