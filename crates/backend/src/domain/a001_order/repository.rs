use chrono::Utc;
use contracts::domain::a001_order::{CustomerKey, Order};
use contracts::domain::common::EntityMetadata;
use contracts::enums::PaymentStatus;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, QueryOrder, Select, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
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
    pub payment_status: String,
    pub is_defective: bool,
    pub defective_note: Option<String>,
    pub batch: Option<String>,
    pub batch_folder: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Order {
    fn from(m: Model) -> Self {
        let payment_status = PaymentStatus::from_label(&m.payment_status).unwrap_or_else(|| {
            tracing::warn!(
                "Order {} has unknown payment status '{}', treating as pending",
                m.id,
                m.payment_status
            );
            PaymentStatus::Pending
        });

        Order {
            id: m.id,
            name: m.name,
            phone: m.phone,
            facebook: m.facebook,
            chapter: m.chapter,
            address: m.address,
            color: m.color,
            size: m.size,
            design: m.design,
            note: m.note,
            quantity: m.quantity,
            price: m.price,
            payment_status,
            is_defective: m.is_defective,
            defective_note: m.defective_note,
            batch: m.batch,
            batch_folder: m.batch_folder,
            metadata: EntityMetadata {
                created_at: m.created_at,
                updated_at: m.updated_at,
            },
        }
    }
}

/// Active model for a write; `id` is left to SQLite when the order has none
fn to_active(order: &Order) -> ActiveModel {
    ActiveModel {
        id: if order.id > 0 {
            Set(order.id)
        } else {
            sea_orm::ActiveValue::NotSet
        },
        name: Set(order.name.clone()),
        phone: Set(order.phone.clone()),
        facebook: Set(order.facebook.clone()),
        chapter: Set(order.chapter.clone()),
        address: Set(order.address.clone()),
        color: Set(order.color.clone()),
        size: Set(order.size.clone()),
        design: Set(order.design.clone()),
        note: Set(order.note.clone()),
        quantity: Set(order.quantity),
        price: Set(order.price),
        payment_status: Set(order.payment_status.label().to_string()),
        is_defective: Set(order.is_defective),
        defective_note: Set(order.defective_note.clone()),
        batch: Set(order.batch.clone()),
        batch_folder: Set(order.batch_folder.clone()),
        created_at: Set(order.metadata.created_at),
        updated_at: Set(order.metadata.updated_at),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Every row of the orders table in insertion order
pub async fn list_all() -> anyhow::Result<Vec<Order>> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_defective() -> anyhow::Result<Vec<Order>> {
    let items = Entity::find()
        .filter(Column::IsDefective.eq(true))
        .order_by_desc(Column::UpdatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<Order>> {
    let result = Entity::find_by_id(id).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Insert several orders atomically; returns their ids in input order
pub async fn insert_many(orders: &[Order]) -> anyhow::Result<Vec<i64>> {
    use sea_orm::TransactionTrait;

    let txn = conn().begin().await?;
    let mut ids = Vec::with_capacity(orders.len());
    for order in orders {
        ids.push(insert_txn(&txn, order).await?);
    }
    txn.commit().await?;
    Ok(ids)
}

pub async fn update(order: &Order) -> anyhow::Result<()> {
    let mut active = to_active(order);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn set_payment_status(id: i64, status: PaymentStatus) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::PaymentStatus, Expr::value(status.label()))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

/// Set (or clear) batch tags on the given orders; returns the number updated
pub async fn assign_batch(
    ids: &[i64],
    batch: Option<String>,
    batch_folder: Option<String>,
) -> anyhow::Result<u64> {
    use sea_orm::sea_query::Expr;
    if ids.is_empty() {
        return Ok(0);
    }
    let result = Entity::update_many()
        .col_expr(Column::Batch, Expr::value(batch))
        .col_expr(Column::BatchFolder, Expr::value(batch_folder))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.is_in(ids.iter().copied()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
}

fn customer_query(key: &CustomerKey) -> Select<Entity> {
    Entity::find()
        .filter(Column::Name.eq(key.name.as_str()))
        .filter(Column::Phone.eq(key.phone.as_str()))
        .filter(Column::Facebook.eq(key.facebook.as_str()))
        .filter(Column::Address.eq(key.address.as_str()))
}

// ----------------------------------------------------------------------------
// Transaction-scoped variants
// ----------------------------------------------------------------------------

pub async fn get_by_id_txn(txn: &DatabaseTransaction, id: i64) -> anyhow::Result<Option<Order>> {
    let result = Entity::find_by_id(id).one(txn).await?;
    Ok(result.map(Into::into))
}

pub async fn find_active_by_customer_txn(
    txn: &DatabaseTransaction,
    key: &CustomerKey,
) -> anyhow::Result<Vec<Order>> {
    find_by_customer_txn(txn, key, false).await
}

/// Orders of one customer; `include_defective = false` limits to active orders
pub async fn find_by_customer_txn(
    txn: &DatabaseTransaction,
    key: &CustomerKey,
    include_defective: bool,
) -> anyhow::Result<Vec<Order>> {
    let mut query = customer_query(key);
    if !include_defective {
        query = query.filter(Column::IsDefective.eq(false));
    }
    let items = query
        .order_by_asc(Column::Id)
        .all(txn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn exists_txn(txn: &DatabaseTransaction, id: i64) -> anyhow::Result<bool> {
    Ok(Entity::find_by_id(id).one(txn).await?.is_some())
}

/// Insert inside a transaction; keeps `order.id` when it is set
pub async fn insert_txn(txn: &DatabaseTransaction, order: &Order) -> anyhow::Result<i64> {
    let result = Entity::insert(to_active(order)).exec(txn).await?;
    Ok(result.last_insert_id)
}

pub async fn update_txn(txn: &DatabaseTransaction, order: &Order) -> anyhow::Result<()> {
    let mut active = to_active(order);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(txn).await?;
    Ok(())
}

pub async fn delete_txn(txn: &DatabaseTransaction, id: i64) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id).exec(txn).await?;
    Ok(result.rows_affected > 0)
}
