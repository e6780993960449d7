mod common;

use common::{create_n, setup};
use notistream_api::{
    Condition, DeleteMode, Error, PaginationParam,
    entity::notifications::{Column, NotificationLevel},
    sea_orm::{ColumnTrait, TransactionTrait},
    uuid::Uuid,
};

#[tokio::test]
async fn create_sets_defaults() {
    let (db, ns) = setup(DeleteMode::Hard).await;
    let tx = db.begin().await.unwrap();
    let (recipient, action) = (Uuid::new_v4(), Uuid::new_v4());

    let item = ns
        .notification
        .create(&tx, &recipient, &action, NotificationLevel::Warning)
        .await
        .unwrap();
    assert!(!item.id.is_nil());
    assert_eq!(item.recipient, recipient);
    assert_eq!(item.action, action);
    assert!(!item.is_read);
    assert!(!item.is_deleted);
    assert_eq!(item.level, NotificationLevel::Warning);
    assert!(item.created_at > 0);
    assert_eq!(item.created_at, item.updated_at);

    let found = ns.notification.find_by_id(&tx, &item.id).await.unwrap();
    assert_eq!(found, Some(item));
}

#[tokio::test]
async fn mark_as_read_is_idempotent() {
    let (db, ns) = setup(DeleteMode::Hard).await;
    let tx = db.begin().await.unwrap();
    let mut item = create_n(&ns, &tx, &Uuid::new_v4(), 1).await.remove(0);

    assert!(ns.notification.mark_as_read(&tx, &mut item).await.unwrap());
    assert!(item.is_read);
    let stored = ns.notification.find_by_id(&tx, &item.id).await.unwrap().unwrap();
    assert!(stored.is_read);

    let before = item.clone();
    assert!(!ns.notification.mark_as_read(&tx, &mut item).await.unwrap());
    assert_eq!(item, before);
    let stored = ns.notification.find_by_id(&tx, &item.id).await.unwrap().unwrap();
    assert_eq!(stored, before);
}

#[tokio::test]
async fn mark_as_unread_only_writes_read_items() {
    let (db, ns) = setup(DeleteMode::Hard).await;
    let tx = db.begin().await.unwrap();
    let mut item = create_n(&ns, &tx, &Uuid::new_v4(), 1).await.remove(0);

    assert!(!ns.notification.mark_as_unread(&tx, &mut item).await.unwrap());
    ns.notification.mark_as_read(&tx, &mut item).await.unwrap();
    assert!(ns.notification.mark_as_unread(&tx, &mut item).await.unwrap());
    assert!(!item.is_read);
    let stored = ns.notification.find_by_id(&tx, &item.id).await.unwrap().unwrap();
    assert!(!stored.is_read);
}

#[tokio::test]
async fn soft_delete_keeps_row() {
    let (db, ns) = setup(DeleteMode::Soft).await;
    let tx = db.begin().await.unwrap();
    let recipient = Uuid::new_v4();
    let item = create_n(&ns, &tx, &recipient, 1).await.remove(0);
    let id = item.id;

    let kept = ns.notification.delete(&tx, item).await.unwrap().unwrap();
    assert!(kept.is_deleted);
    let stored = ns.notification.find_by_id(&tx, &id).await.unwrap().unwrap();
    assert!(stored.is_deleted);

    let active = ns.queryset().active(Condition::default()).unwrap();
    assert_eq!(ns.notification.count(&tx, active).await.unwrap(), 0);
    let deleted = ns.queryset().deleted(Condition::default()).unwrap();
    assert_eq!(ns.notification.count(&tx, deleted).await.unwrap(), 1);

    // A second soft delete does not write.
    let mut again = stored.clone();
    assert!(!ns.notification.soft_delete(&tx, &mut again).await.unwrap());
    assert_eq!(again, stored);
}

#[tokio::test]
async fn hard_delete_removes_row() {
    let (db, ns) = setup(DeleteMode::Hard).await;
    let tx = db.begin().await.unwrap();
    let item = create_n(&ns, &tx, &Uuid::new_v4(), 1).await.remove(0);
    let id = item.id;

    assert!(ns.notification.delete(&tx, item).await.unwrap().is_none());
    assert!(ns.notification.find_by_id(&tx, &id).await.unwrap().is_none());
    assert_eq!(
        ns.notification.count(&tx, Condition::default()).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn soft_delete_needs_soft_mode() {
    let (db, ns) = setup(DeleteMode::Hard).await;
    let tx = db.begin().await.unwrap();
    let mut item = create_n(&ns, &tx, &Uuid::new_v4(), 1).await.remove(0);

    let err = ns.notification.soft_delete(&tx, &mut item).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::SoftDeleteDisabled)
    ));
    let stored = ns.notification.find_by_id(&tx, &item.id).await.unwrap().unwrap();
    assert!(!stored.is_deleted);
}

#[tokio::test]
async fn find_paginates() {
    let (db, ns) = setup(DeleteMode::Hard).await;
    let tx = db.begin().await.unwrap();
    let recipient = Uuid::new_v4();
    create_n(&ns, &tx, &recipient, 5).await;
    create_n(&ns, &tx, &Uuid::new_v4(), 2).await;

    let cond = Condition::default()
        .add(Column::Recipient.eq(recipient))
        .add_page(PaginationParam { page: 2, size: 2 });
    let (items, total) = ns.notification.find(&tx, cond).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(total, 5);
    assert!(items.iter().all(|x| x.recipient == recipient));

    let (items, total) = ns.notification.find(&tx, Condition::default()).await.unwrap();
    assert_eq!(items.len(), 7);
    assert_eq!(total, 7);
}

#[tokio::test]
async fn find_rejects_invalid_page() {
    let (db, ns) = setup(DeleteMode::Hard).await;
    let tx = db.begin().await.unwrap();
    create_n(&ns, &tx, &Uuid::new_v4(), 3).await;

    for page in [
        PaginationParam { page: 0, size: 10 },
        PaginationParam { page: 1, size: 0 },
    ] {
        let err = ns
            .notification
            .find(&tx, Condition::default().add_page(page))
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Validation(_))));
    }
}
