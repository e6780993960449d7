use anyhow::Result;
use async_trait::async_trait;
use derivative::Derivative;
use notistream_macro::default_manager_impl;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, EntityTrait, Set, Unchanged};
use tracing::debug;
use uuid::Uuid;

use crate::{
    DeleteMode,
    entity::notifications::{self, NotificationLevel},
    handler::{NotificationManager, NotificationQuerySet},
    handler_impl::DefaultNotificationQuerySet,
};

#[derive(Derivative)]
#[derivative(Debug)]
pub struct DefaultNotificationManager {
    #[derivative(Debug = "ignore")]
    queryset: Box<dyn NotificationQuerySet>,
}

impl DefaultNotificationManager {
    #[must_use]
    pub fn new(queryset: Box<dyn NotificationQuerySet>) -> Self {
        Self { queryset }
    }

    /// Manager over the default query set.
    #[must_use]
    pub fn with_mode(mode: DeleteMode) -> Self {
        Self::new(Box::new(DefaultNotificationQuerySet::with_mode(mode)))
    }
}

#[default_manager_impl(notifications)]
#[async_trait]
impl NotificationManager for DefaultNotificationManager {
    fn queryset(&self) -> &dyn NotificationQuerySet {
        self.queryset.as_ref()
    }

    async fn create(
        &self,
        db: &DatabaseTransaction,
        recipient: &Uuid,
        action: &Uuid,
        level: NotificationLevel,
    ) -> Result<notifications::Model> {
        notifications::ActiveModel {
            recipient: Set(*recipient),
            action: Set(*action),
            is_read: Set(false),
            is_deleted: Set(false),
            level: Set(level),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(Into::into)
    }

    async fn mark_as_read(
        &self,
        db: &DatabaseTransaction,
        item: &mut notifications::Model,
    ) -> Result<bool> {
        if item.is_read {
            return Ok(false);
        }
        *item = notifications::ActiveModel {
            id: Unchanged(item.id),
            is_read: Set(true),
            ..Default::default()
        }
        .update(db)
        .await?;
        Ok(true)
    }

    async fn mark_as_unread(
        &self,
        db: &DatabaseTransaction,
        item: &mut notifications::Model,
    ) -> Result<bool> {
        if !item.is_read {
            return Ok(false);
        }
        *item = notifications::ActiveModel {
            id: Unchanged(item.id),
            is_read: Set(false),
            ..Default::default()
        }
        .update(db)
        .await?;
        Ok(true)
    }

    async fn soft_delete(
        &self,
        db: &DatabaseTransaction,
        item: &mut notifications::Model,
    ) -> Result<bool> {
        self.mode().ensure_soft()?;
        if item.is_deleted {
            return Ok(false);
        }
        *item = notifications::ActiveModel {
            id: Unchanged(item.id),
            is_deleted: Set(true),
            ..Default::default()
        }
        .update(db)
        .await?;
        Ok(true)
    }

    async fn remove(&self, db: &DatabaseTransaction, item: notifications::Model) -> Result<()> {
        let rows = notifications::Entity::delete_by_id(item.id)
            .exec(db)
            .await?
            .rows_affected;
        debug!(id = %item.id, rows, "Notification removed");
        Ok(())
    }

    async fn delete(
        &self,
        db: &DatabaseTransaction,
        mut item: notifications::Model,
    ) -> Result<Option<notifications::Model>> {
        match self.mode() {
            DeleteMode::Soft => {
                self.soft_delete(db, &mut item).await?;
                Ok(Some(item))
            }
            DeleteMode::Hard => {
                self.remove(db, item).await?;
                Ok(None)
            }
        }
    }
}
