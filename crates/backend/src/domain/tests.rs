//! Order lifecycle against a real SQLite file.
//!
//! The connection is a process-wide `OnceCell` and restore-all / empty act on
//! the whole trash, so every step runs inside one test, in order.

use contracts::domain::a001_order::{
    CustomerFieldsDto, CustomerKey, CustomerUpdateDto, OrderCaptureDto, OrderLineDto,
    OrderUpdateDto,
};
use contracts::domain::a002_trash_order::TrashOrder;
use contracts::domain::common::{ReferenceItemDto, ReferenceKind};

use super::a001_order::{lifecycle, repository, service};
use super::a002_trash_order::service as trash;
use super::a003_reference_data::service as reference;
use crate::shared::data::db::initialize_database;
use crate::shared::error::ApiError;

fn customer(name: &str, phone: &str) -> CustomerFieldsDto {
    CustomerFieldsDto {
        name: name.into(),
        phone: phone.into(),
        chapter: "Alpha".into(),
        address: "Dorm 3".into(),
        ..Default::default()
    }
}

fn key(name: &str, phone: &str) -> CustomerKey {
    CustomerKey {
        name: name.into(),
        phone: phone.into(),
        facebook: String::new(),
        address: "Dorm 3".into(),
    }
}

fn line(color: &str, size: &str) -> OrderLineDto {
    OrderLineDto {
        color: color.into(),
        size: size.into(),
        design: "Logo".into(),
        quantity: Some(1),
        price: Some(350.0),
        ..Default::default()
    }
}

async fn capture(name: &str, phone: &str, lines: Vec<OrderLineDto>, folder: Option<&str>) -> Vec<i64> {
    service::create_batch(OrderCaptureDto {
        customer: customer(name, phone),
        lines,
        batch_folder: folder.map(str::to_string),
        ..Default::default()
    })
    .await
    .unwrap()
}

async fn trashed_from(original_id: i64) -> TrashOrder {
    trash::list_all()
        .await
        .unwrap()
        .into_iter()
        .find(|t| t.original_id == original_id)
        .unwrap()
}

fn status_of(err: anyhow::Error) -> axum::http::StatusCode {
    ApiError::from(err).status()
}

#[tokio::test]
async fn test_order_lifecycle_on_sqlite() {
    let db_file = std::env::temp_dir().join(format!("undergrads-test-{}.db", uuid::Uuid::new_v4()));
    initialize_database(&db_file).await.unwrap();

    reference::create(ReferenceKind::BatchFolder, ReferenceItemDto { name: "Batch A".into() })
        .await
        .unwrap();

    let ana = capture("Ana", "0917", vec![line("Black", "M"), line("White", "L")], Some("Batch A")).await;
    let ben = capture("Ben", "0918", vec![line("Black", "S")], Some("Batch A")).await;
    assert_eq!(ana.len(), 2);

    trash_whole_customer(&ana).await;
    rename_folder_moves_orders_and_trash(ben[0]).await;
    restore_reuses_free_id(ana[0]).await;
    restore_taken_id_gets_new_id(ana[1], ben[0]).await;
    restore_all_and_empty(ana[0], ben[0]).await;
    mark_defective_twice_keeps_one_row().await;
    purge_defective_refuses_active_order().await;
    delete_folder_clears_references().await;
    edit_customer_regroups_orders().await;

    let _ = std::fs::remove_file(&db_file);
}

async fn trash_whole_customer(ana: &[i64]) {
    let trash_ids = lifecycle::move_customer_to_trash(&key("Ana", "0917")).await.unwrap();
    assert_eq!(trash_ids.len(), 2);
    for id in ana {
        assert!(service::get_by_id(*id).await.unwrap().is_none());
        let row = trashed_from(*id).await;
        assert_eq!(row.batch_folder.as_deref(), Some("Batch A"));
    }

    // nothing active left: refused and the trash is unchanged
    let err = lifecycle::move_customer_to_trash(&key("Ana", "0917")).await.unwrap_err();
    assert_eq!(status_of(err), axum::http::StatusCode::NOT_FOUND);
    assert_eq!(trash::count().await.unwrap(), 2);
}

async fn rename_folder_moves_orders_and_trash(ben: i64) {
    let folder = reference::list(ReferenceKind::BatchFolder).await.unwrap()[0].clone();
    reference::rename(ReferenceKind::BatchFolder, folder.id, ReferenceItemDto { name: "Batch B".into() })
        .await
        .unwrap();

    let order = service::get_by_id(ben).await.unwrap().unwrap();
    assert_eq!(order.batch_folder.as_deref(), Some("Batch B"));
    for row in trash::list_all().await.unwrap() {
        assert_eq!(row.batch_folder.as_deref(), Some("Batch B"));
    }

    // the order stays editable under its renamed folder
    let edited = service::update(
        ben,
        OrderUpdateDto {
            customer: customer("Ben", "0918"),
            line: line("Navy", "S"),
            batch_folder: order.batch_folder.clone(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(edited.color, "Navy");
}

async fn restore_reuses_free_id(original_id: i64) {
    let row = trashed_from(original_id).await;
    assert_eq!(trash::restore(row.id).await.unwrap(), original_id);
    assert!(service::get_by_id(original_id).await.unwrap().is_some());
    assert!(trash::get_by_id(row.id).await.unwrap().is_none());
}

async fn restore_taken_id_gets_new_id(original_id: i64, template: i64) {
    let mut occupant = service::get_by_id(template).await.unwrap().unwrap();
    occupant.id = original_id;
    repository::insert_many(&[occupant]).await.unwrap();

    let row = trashed_from(original_id).await;
    let restored = trash::restore(row.id).await.unwrap();
    assert_ne!(restored, original_id);

    let order = service::get_by_id(restored).await.unwrap().unwrap();
    assert_eq!(order.name, "Ana");
    assert_eq!(order.color, "White");
    assert_eq!(service::get_by_id(original_id).await.unwrap().unwrap().name, "Ben");
    assert_eq!(trash::count().await.unwrap(), 0);
}

async fn restore_all_and_empty(first: i64, second: i64) {
    lifecycle::move_to_trash(first).await.unwrap();
    lifecycle::move_to_trash(second).await.unwrap();
    assert_eq!(trash::count().await.unwrap(), 2);

    let mut restored = trash::restore_all().await.unwrap();
    restored.sort_unstable();
    let mut expected = vec![first, second];
    expected.sort_unstable();
    assert_eq!(restored, expected);
    assert_eq!(trash::count().await.unwrap(), 0);
    assert!(trash::restore_all().await.unwrap().is_empty());

    lifecycle::move_to_trash(first).await.unwrap();
    lifecycle::move_to_trash(second).await.unwrap();
    assert_eq!(trash::empty().await.unwrap(), 2);
    assert_eq!(trash::count().await.unwrap(), 0);
    assert!(service::get_by_id(first).await.unwrap().is_none());
    assert_eq!(trash::empty().await.unwrap(), 0);
}

async fn mark_defective_twice_keeps_one_row() {
    let ids = capture("Cara", "0919", vec![line("Red", "XL")], None).await;
    let total = repository::list_all().await.unwrap().len();

    lifecycle::mark_defective(ids[0], Some("Misprint".into())).await.unwrap();
    let order = lifecycle::mark_defective(ids[0], Some("Torn seam".into())).await.unwrap();
    assert!(order.is_defective);

    let defective = service::list_defective().await.unwrap();
    assert_eq!(defective.iter().filter(|o| o.id == ids[0]).count(), 1);
    assert_eq!(defective[0].defective_note.as_deref(), Some("Torn seam"));
    assert_eq!(repository::list_all().await.unwrap().len(), total);

    lifecycle::purge_defective(ids[0]).await.unwrap();
    assert!(service::get_by_id(ids[0]).await.unwrap().is_none());
}

async fn purge_defective_refuses_active_order() {
    let ids = capture("Dan", "0920", vec![line("Gray", "M")], None).await;
    let err = lifecycle::purge_defective(ids[0]).await.unwrap_err();
    assert_eq!(status_of(err), axum::http::StatusCode::CONFLICT);
    assert!(service::get_by_id(ids[0]).await.unwrap().is_some());
}

async fn delete_folder_clears_references() {
    let folder = reference::create(ReferenceKind::BatchFolder, ReferenceItemDto { name: "Batch C".into() })
        .await
        .unwrap();
    let ids = capture("Eve", "0921", vec![line("Green", "S")], Some("Batch C")).await;
    lifecycle::move_to_trash(ids[0]).await.unwrap();
    let kept = capture("Eve", "0921", vec![line("Green", "M")], Some("Batch C")).await;

    reference::delete(ReferenceKind::BatchFolder, folder.id).await.unwrap();

    let order = service::get_by_id(kept[0]).await.unwrap().unwrap();
    assert_eq!(order.batch_folder, None);
    let row = trashed_from(ids[0]).await;
    assert_eq!(row.batch_folder, None);

    trash::purge(row.id).await.unwrap();
    let err = trash::purge(row.id).await.unwrap_err();
    assert_eq!(status_of(err), axum::http::StatusCode::NOT_FOUND);
}

async fn edit_customer_regroups_orders() {
    let ids = capture("Finn", "0922", vec![line("Black", "M"), line("Black", "L")], None).await;
    lifecycle::mark_defective(ids[1], None).await.unwrap();

    let updated = service::update_customer(CustomerUpdateDto {
        key: key("Finn", "0922"),
        customer: customer("Finn Cruz", "0922"),
    })
    .await
    .unwrap();
    assert_eq!(updated, ids);

    for id in &ids {
        assert_eq!(service::get_by_id(*id).await.unwrap().unwrap().name, "Finn Cruz");
    }
    let err = service::update_customer(CustomerUpdateDto {
        key: key("Finn", "0922"),
        customer: customer("Finn", "0922"),
    })
    .await
    .unwrap_err();
    assert_eq!(status_of(err), axum::http::StatusCode::NOT_FOUND);
}
