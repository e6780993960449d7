use anyhow::Result;
use async_trait::async_trait;
use notistream_macro::default_manager;
use sea_orm::DatabaseTransaction;
use uuid::Uuid;

use crate::{
    Condition, DeleteMode,
    entity::notifications::{self, NotificationLevel},
};

/// Set-level notification queries.
///
/// Narrowing methods take the collection as a [`Condition`] and return the
/// narrowed one. `mark_all_*` execute a single `UPDATE` over the narrowed
/// collection and return the number of rows changed.
#[async_trait]
pub trait NotificationQuerySet: Send + Sync {
    /// Delete mode this query set was built with.
    fn mode(&self) -> DeleteMode;

    /// Unread items. Deleted items are excluded only in soft delete mode.
    fn unread(&self, cond: Condition) -> Condition;

    /// Read items. Deleted items are excluded only in soft delete mode.
    fn read(&self, cond: Condition) -> Condition;

    /// Deleted items, soft delete mode only.
    fn deleted(&self, cond: Condition) -> Result<Condition>;

    /// Active (not deleted) items, soft delete mode only.
    fn active(&self, cond: Condition) -> Result<Condition>;

    /// Mark unread items in `cond` as read, optionally only those of `recipient`.
    async fn mark_all_as_read(
        &self,
        db: &DatabaseTransaction,
        cond: Condition,
        recipient: Option<&Uuid>,
    ) -> Result<u64>;

    /// Mark read items in `cond` as unread, optionally only those of `recipient`.
    async fn mark_all_as_unread(
        &self,
        db: &DatabaseTransaction,
        cond: Condition,
        recipient: Option<&Uuid>,
    ) -> Result<u64>;

    /// Mark active items in `cond` as deleted, soft delete mode only.
    /// Storage is untouched when the mode check fails.
    async fn mark_all_as_deleted(
        &self,
        db: &DatabaseTransaction,
        cond: Condition,
        recipient: Option<&Uuid>,
    ) -> Result<u64>;

    /// Mark deleted items in `cond` as active, soft delete mode only.
    async fn mark_all_as_active(
        &self,
        db: &DatabaseTransaction,
        cond: Condition,
        recipient: Option<&Uuid>,
    ) -> Result<u64>;
}

/// Notification manager, the instance-level operations.
#[default_manager(notifications)]
#[async_trait]
pub trait NotificationManager: Send + Sync {
    /// Query set this manager was built from.
    fn queryset(&self) -> &dyn NotificationQuerySet;

    fn mode(&self) -> DeleteMode {
        self.queryset().mode()
    }

    /// Create a notification of `action` for `recipient`.
    async fn create(
        &self,
        db: &DatabaseTransaction,
        recipient: &Uuid,
        action: &Uuid,
        level: NotificationLevel,
    ) -> Result<notifications::Model>;

    /// Mark `item` as read and persist it.
    /// Return `false` without writing when it is already read.
    async fn mark_as_read(
        &self,
        db: &DatabaseTransaction,
        item: &mut notifications::Model,
    ) -> Result<bool>;

    /// Mark `item` as unread and persist it.
    /// Return `false` without writing when it is already unread.
    async fn mark_as_unread(
        &self,
        db: &DatabaseTransaction,
        item: &mut notifications::Model,
    ) -> Result<bool>;

    /// Flag `item` as deleted and persist it, soft delete mode only.
    /// Return `false` without writing when it is already deleted.
    async fn soft_delete(
        &self,
        db: &DatabaseTransaction,
        item: &mut notifications::Model,
    ) -> Result<bool>;

    /// Remove `item` from storage permanently.
    async fn remove(&self, db: &DatabaseTransaction, item: notifications::Model) -> Result<()>;

    /// Delete `item` according to the delete mode.
    ///
    /// - Soft mode: flag it and return the retained record.
    /// - Hard mode: remove it and return `None`.
    async fn delete(
        &self,
        db: &DatabaseTransaction,
        item: notifications::Model,
    ) -> Result<Option<notifications::Model>>;
}

/// Activity stream action manager.
#[async_trait]
pub trait ActionManager: Send + Sync {
    /// Fan `action` out to `recipients`, one notification each, in one insert.
    /// Duplicated recipients are notified once.
    async fn fan_out(
        &self,
        db: &DatabaseTransaction,
        action: &Uuid,
        recipients: &[Uuid],
        level: NotificationLevel,
    ) -> Result<u64>;

    /// Notifications created for `action`, narrowed by `cond`.
    async fn notifications(
        &self,
        db: &DatabaseTransaction,
        action: &Uuid,
        cond: Condition,
    ) -> Result<Vec<notifications::Model>>;
}
