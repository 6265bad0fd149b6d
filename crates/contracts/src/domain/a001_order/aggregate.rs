use serde::{Deserialize, Serialize};

use super::customer::CustomerKey;
use super::lifecycle::OrderLifecycle;
use crate::domain::common::{require_text, AggregateRoot, EntityMetadata, ValidationError};
use crate::enums::PaymentStatus;

// ============================================================================
// Aggregate Root
// ============================================================================

/// One customer line item: a single color/size/design combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,

    // Customer fields
    pub name: String,
    pub phone: String,
    pub facebook: String,
    pub chapter: String,
    pub address: String,

    // Line fields
    pub color: String,
    pub size: String,
    pub design: String,
    pub note: Option<String>,
    pub quantity: i32,

    // Commercial fields
    pub price: f64,
    pub payment_status: PaymentStatus,

    pub is_defective: bool,
    pub defective_note: Option<String>,

    pub batch: Option<String>,
    pub batch_folder: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Order {
    /// Build a new unsaved order (id = 0) from capture form data
    pub fn new_for_insert(
        customer: &CustomerFieldsDto,
        line: &OrderLineDto,
        payment_status: PaymentStatus,
        batch: Option<String>,
        batch_folder: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            name: customer.name.trim().to_string(),
            phone: customer.phone.trim().to_string(),
            facebook: customer.facebook.trim().to_string(),
            chapter: customer.chapter.trim().to_string(),
            address: customer.address.trim().to_string(),
            color: line.color.trim().to_string(),
            size: line.size.trim().to_string(),
            design: line.design.trim().to_string(),
            note: normalize_optional(line.note.clone()),
            quantity: line.quantity.unwrap_or(1),
            price: line.price.unwrap_or(0.0),
            payment_status,
            is_defective: false,
            defective_note: None,
            batch: normalize_optional(batch),
            batch_folder: normalize_optional(batch_folder),
            metadata: EntityMetadata::new(),
        }
    }

    /// Identity tuple used to reconstruct customers
    pub fn customer_key(&self) -> CustomerKey {
        CustomerKey {
            name: self.name.clone(),
            phone: self.phone.clone(),
            facebook: self.facebook.clone(),
            address: self.address.clone(),
        }
    }

    /// Current lifecycle state of a row in the orders table
    pub fn lifecycle(&self) -> OrderLifecycle {
        if self.is_defective {
            OrderLifecycle::Defective
        } else {
            OrderLifecycle::Active
        }
    }

    /// quantity × price
    pub fn amount(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    /// Apply an edit form
    pub fn update(&mut self, dto: &OrderUpdateDto) {
        self.name = dto.customer.name.trim().to_string();
        self.phone = dto.customer.phone.trim().to_string();
        self.facebook = dto.customer.facebook.trim().to_string();
        self.chapter = dto.customer.chapter.trim().to_string();
        self.address = dto.customer.address.trim().to_string();
        self.color = dto.line.color.trim().to_string();
        self.size = dto.line.size.trim().to_string();
        self.design = dto.line.design.trim().to_string();
        self.note = normalize_optional(dto.line.note.clone());
        self.quantity = dto.line.quantity.unwrap_or(self.quantity);
        self.price = dto.line.price.unwrap_or(self.price);
        if let Some(status) = dto.payment_status {
            self.payment_status = status;
        }
        self.batch = normalize_optional(dto.batch.clone());
        self.batch_folder = normalize_optional(dto.batch_folder.clone());
    }

    /// Apply customer fields (used when editing a whole customer)
    pub fn apply_customer(&mut self, customer: &CustomerFieldsDto) {
        self.name = customer.name.trim().to_string();
        self.phone = customer.phone.trim().to_string();
        self.facebook = customer.facebook.trim().to_string();
        self.chapter = customer.chapter.trim().to_string();
        self.address = customer.address.trim().to_string();
    }

    /// Validate stored values
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "Name")?;
        require_text(&self.color, "Color")?;
        require_text(&self.size, "Size")?;
        require_text(&self.design, "Design")?;
        if self.quantity < 1 {
            return Err(ValidationError::Invalid(
                "Quantity must be at least 1".into(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::Invalid(
                "Price must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    /// Hook before write
    pub fn before_write(&mut self) {
        self.metadata.touch();
    }
}

impl AggregateRoot for Order {
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
        "a001"
    }

    fn collection_name() -> &'static str {
        "orders"
    }

    fn element_name() -> &'static str {
        "Order"
    }

    fn list_name() -> &'static str {
        "Orders"
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Customer part of the capture and edit forms
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CustomerFieldsDto {
    pub name: String,
    pub phone: String,
    pub facebook: String,
    pub chapter: String,
    pub address: String,
}

/// One repeatable line of the capture form
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct OrderLineDto {
    pub color: String,
    pub size: String,
    pub design: String,
    pub note: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
}

impl OrderLineDto {
    fn validate(&self, line_no: usize) -> Result<(), ValidationError> {
        for (value, field) in [
            (&self.color, "Color"),
            (&self.size, "Size"),
            (&self.design, "Design"),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Required(format!(
                    "{} (line {})",
                    field, line_no
                )));
            }
        }
        if let Some(quantity) = self.quantity {
            if quantity < 1 {
                return Err(ValidationError::Invalid(format!(
                    "Quantity must be at least 1 (line {})",
                    line_no
                )));
            }
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(ValidationError::Invalid(format!(
                    "Price must be a non-negative number (line {})",
                    line_no
                )));
            }
        }
        Ok(())
    }
}

/// Order capture form: customer plus one or more lines
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrderCaptureDto {
    pub customer: CustomerFieldsDto,
    pub lines: Vec<OrderLineDto>,
    pub payment_status: Option<PaymentStatus>,
    pub batch: Option<String>,
    pub batch_folder: Option<String>,
}

impl OrderCaptureDto {
    /// Check required fields before any write
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.customer.name, "Name")?;
        if self.lines.is_empty() {
            return Err(ValidationError::Invalid(
                "At least one order line is required".into(),
            ));
        }
        for (idx, line) in self.lines.iter().enumerate() {
            line.validate(idx + 1)?;
        }
        Ok(())
    }

    /// Strip the fields a customer may not set on the public order page
    pub fn into_public(mut self) -> Self {
        self.payment_status = None;
        self.batch = None;
        self.batch_folder = None;
        for line in &mut self.lines {
            line.price = None;
        }
        self
    }

    /// Orders to insert, one per line
    pub fn to_orders(&self) -> Vec<Order> {
        let status = self.payment_status.unwrap_or_default();
        self.lines
            .iter()
            .map(|line| {
                Order::new_for_insert(
                    &self.customer,
                    line,
                    status,
                    self.batch.clone(),
                    self.batch_folder.clone(),
                )
            })
            .collect()
    }
}

/// Edit form for a single order
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrderUpdateDto {
    pub customer: CustomerFieldsDto,
    pub line: OrderLineDto,
    pub payment_status: Option<PaymentStatus>,
    pub batch: Option<String>,
    pub batch_folder: Option<String>,
}

impl OrderUpdateDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.customer.name, "Name")?;
        self.line.validate(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusDto {
    pub payment_status: PaymentStatus,
}

/// Assign (or clear with `None`) batch tags on a set of orders
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BatchAssignDto {
    pub order_ids: Vec<i64>,
    pub batch: Option<String>,
    pub batch_folder: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DefectiveNoteDto {
    pub note: Option<String>,
}

impl DefectiveNoteDto {
    /// Trimmed note, `None` when blank
    pub fn normalized(&self) -> Option<String> {
        normalize_optional(self.note.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(lines: Vec<OrderLineDto>) -> OrderCaptureDto {
        OrderCaptureDto {
            customer: CustomerFieldsDto {
                name: "Maria Santos".into(),
                phone: "0917".into(),
                ..Default::default()
            },
            lines,
            ..Default::default()
        }
    }

    fn line(color: &str, size: &str, design: &str) -> OrderLineDto {
        OrderLineDto {
            color: color.into(),
            size: size.into(),
            design: design.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_capture_requires_name() {
        let mut dto = capture(vec![line("Black", "M", "Logo")]);
        dto.customer.name = "  ".into();
        assert_eq!(dto.validate(), Err(ValidationError::Required("Name".into())));
    }

    #[test]
    fn test_capture_requires_each_line_field() {
        let dto = capture(vec![line("Black", "M", "Logo"), line("White", "", "Logo")]);
        assert_eq!(
            dto.validate(),
            Err(ValidationError::Required("Size (line 2)".into()))
        );
        assert!(capture(vec![]).validate().is_err());
    }

    #[test]
    fn test_capture_creates_one_pending_order_per_line() {
        let dto = capture(vec![line("Black", "M", "Logo"), line(" White ", "L", "Seal")]);
        assert!(dto.validate().is_ok());
        let orders = dto.to_orders();
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.payment_status == PaymentStatus::Pending));
        assert!(orders.iter().all(|o| o.quantity == 1 && o.id == 0));
        assert_eq!(orders[1].color, "White");
        assert_eq!(orders[0].customer_key(), orders[1].customer_key());
    }

    #[test]
    fn test_public_capture_strips_staff_fields() {
        let mut dto = capture(vec![OrderLineDto {
            price: Some(350.0),
            ..line("Black", "M", "Logo")
        }]);
        dto.payment_status = Some(PaymentStatus::FullyPaid);
        dto.batch_folder = Some("Batch 3".into());
        let orders = dto.into_public().to_orders();
        assert_eq!(orders[0].price, 0.0);
        assert_eq!(orders[0].payment_status, PaymentStatus::Pending);
        assert_eq!(orders[0].batch_folder, None);
    }

    #[test]
    fn test_invalid_quantity_and_price() {
        let dto = capture(vec![OrderLineDto {
            quantity: Some(0),
            ..line("Black", "M", "Logo")
        }]);
        assert!(matches!(dto.validate(), Err(ValidationError::Invalid(_))));
        let dto = capture(vec![OrderLineDto {
            price: Some(-1.0),
            ..line("Black", "M", "Logo")
        }]);
        assert!(matches!(dto.validate(), Err(ValidationError::Invalid(_))));
    }

    #[test]
    fn test_lifecycle_and_amount() {
        let mut order = capture(vec![OrderLineDto {
            quantity: Some(3),
            price: Some(250.0),
            ..line("Black", "M", "Logo")
        }])
        .to_orders()
        .remove(0);
        assert_eq!(order.amount(), 750.0);
        assert_eq!(order.lifecycle(), OrderLifecycle::Active);
        order.is_defective = true;
        assert_eq!(order.lifecycle(), OrderLifecycle::Defective);
    }

    #[test]
    fn test_order_naming_metadata() {
        assert_eq!(Order::collection_name(), "orders");
        assert_eq!(Order::full_name(), "a001_orders");
    }
}
