use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use notistream_api::sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// # Errors
///
/// Will return `Err` for db error.
pub async fn connect<S: AsRef<str>>(dsn: S) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(dsn.as_ref().to_owned());
    opt.sqlx_logging(false);
    Database::connect(opt).await
}

/// Apply every pending migration.
///
/// # Errors
///
/// Will return `Err` for db error.
pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
    let pending = Migrator::get_pending_migrations(db).await?.len();
    Migrator::up(db, None).await?;
    info!(pending, "Database migrated");
    Ok(())
}
