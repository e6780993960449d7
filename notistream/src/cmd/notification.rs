use anyhow::Result;
use notistream_api::{Condition, Error, sea_orm::TransactionTrait};
use tracing::info;

use crate::{Cli, NotificationCli, NotificationCommands};

use super::init;

pub async fn command(cli: &Cli, notification_cli: &NotificationCli) -> Result<()> {
    let (notistream, db) = init(cli).await?;
    let qs = notistream.queryset();
    let all = Condition::default();

    let tx = db.begin().await?;
    match &notification_cli.command {
        // notistream notification read
        NotificationCommands::Read { recipient } => {
            let rows = qs.mark_all_as_read(&tx, all, recipient.as_ref()).await?;
            info!(rows, "Notifications marked as read");
        }
        // notistream notification unread
        NotificationCommands::Unread { recipient } => {
            let rows = qs.mark_all_as_unread(&tx, all, recipient.as_ref()).await?;
            info!(rows, "Notifications marked as unread");
        }
        // notistream notification trash
        NotificationCommands::Trash { recipient } => {
            let rows = qs.mark_all_as_deleted(&tx, all, recipient.as_ref()).await?;
            info!(rows, "Notifications moved to trash");
        }
        // notistream notification restore
        NotificationCommands::Restore { recipient } => {
            let rows = qs.mark_all_as_active(&tx, all, recipient.as_ref()).await?;
            info!(rows, "Notifications restored");
        }
        // notistream notification delete
        NotificationCommands::Delete { id } => {
            let item = notistream
                .notification
                .find_by_id(&tx, id)
                .await?
                .ok_or(Error::NotFound(*id))?;
            match notistream.notification.delete(&tx, item).await? {
                Some(_) => info!(%id, "Notification soft deleted"),
                None => info!(%id, "Notification deleted"),
            }
        }
    }
    tx.commit().await?;
    Ok(())
}
