use contracts::domain::a002_trash_order::TrashOrder;
use contracts::domain::common::EntityMetadata;
use contracts::enums::PaymentStatus;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, PaginatorTrait, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trash_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
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
    pub payment_status: String,
    pub batch: Option<String>,
    pub batch_folder: Option<String>,
    pub deleted_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for TrashOrder {
    fn from(m: Model) -> Self {
        TrashOrder {
            id: m.id,
            original_id: m.original_id,
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
            payment_status: PaymentStatus::from_label(&m.payment_status).unwrap_or_default(),
            batch: m.batch,
            batch_folder: m.batch_folder,
            deleted_at: m.deleted_at,
            metadata: EntityMetadata {
                created_at: m.created_at,
                updated_at: m.updated_at,
            },
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Trash contents, most recently deleted first
pub async fn list_all() -> anyhow::Result<Vec<TrashOrder>> {
    let items = Entity::find()
        .order_by_desc(Column::DeletedAt)
        .order_by_desc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<TrashOrder>> {
    let result = Entity::find_by_id(id).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn count() -> anyhow::Result<u64> {
    Ok(Entity::find().count(conn()).await?)
}

pub async fn get_by_id_txn(
    txn: &DatabaseTransaction,
    id: i64,
) -> anyhow::Result<Option<TrashOrder>> {
    let result = Entity::find_by_id(id).one(txn).await?;
    Ok(result.map(Into::into))
}

/// Whole trash inside a transaction, oldest first so restores keep order
pub async fn list_all_txn(txn: &DatabaseTransaction) -> anyhow::Result<Vec<TrashOrder>> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(txn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert_txn(txn: &DatabaseTransaction, item: &TrashOrder) -> anyhow::Result<i64> {
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        original_id: Set(item.original_id),
        name: Set(item.name.clone()),
        phone: Set(item.phone.clone()),
        facebook: Set(item.facebook.clone()),
        chapter: Set(item.chapter.clone()),
        address: Set(item.address.clone()),
        color: Set(item.color.clone()),
        size: Set(item.size.clone()),
        design: Set(item.design.clone()),
        note: Set(item.note.clone()),
        quantity: Set(item.quantity),
        price: Set(item.price),
        payment_status: Set(item.payment_status.label().to_string()),
        batch: Set(item.batch.clone()),
        batch_folder: Set(item.batch_folder.clone()),
        deleted_at: Set(item.deleted_at),
        created_at: Set(item.metadata.created_at),
        updated_at: Set(item.metadata.updated_at),
    };
    let result = Entity::insert(active).exec(txn).await?;
    Ok(result.last_insert_id)
}

pub async fn delete_txn(txn: &DatabaseTransaction, id: i64) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id).exec(txn).await?;
    Ok(result.rows_affected > 0)
}

pub async fn delete(id: i64) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}

/// Empty the trash; returns the ids removed
pub async fn delete_all_txn(txn: &DatabaseTransaction) -> anyhow::Result<Vec<i64>> {
    let ids: Vec<i64> = Entity::find()
        .all(txn)
        .await?
        .into_iter()
        .map(|m| m.id)
        .collect();
    Entity::delete_many().exec(txn).await?;
    Ok(ids)
}
