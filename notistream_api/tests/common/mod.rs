use migration::{Migrator, MigratorTrait};
use notistream_api::{
    DeleteMode, Notistream, Registry,
    config::ActstreamSettings,
    entity::notifications::{self, NotificationLevel},
    sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction},
    uuid::Uuid,
};

/// Fresh in-memory database with the schema applied.
pub async fn setup(mode: DeleteMode) -> (DatabaseConnection, Notistream) {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let settings = ActstreamSettings {
        notifications_soft_delete: mode.is_soft(),
        ..Default::default()
    };
    (db, Registry::new().build(&settings).unwrap())
}

/// Create `n` notifications of a new action for `recipient`.
pub async fn create_n(
    ns: &Notistream,
    tx: &DatabaseTransaction,
    recipient: &Uuid,
    n: usize,
) -> Vec<notifications::Model> {
    let mut ret = Vec::new();
    for _ in 0..n {
        ret.push(
            ns.notification
                .create(tx, recipient, &Uuid::new_v4(), NotificationLevel::Info)
                .await
                .unwrap(),
        );
    }
    ret
}
