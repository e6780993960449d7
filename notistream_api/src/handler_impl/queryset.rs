use anyhow::Result;
use async_trait::async_trait;
use derivative::Derivative;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, sea_query::Expr};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    Condition, DeleteMode,
    entity::notifications::{Column, Entity},
    handler::NotificationQuerySet,
    now_millis,
};

#[derive(Derivative)]
#[derivative(Debug, Default(new = "true"))]
pub struct DefaultNotificationQuerySet {
    mode: DeleteMode,
}

impl DefaultNotificationQuerySet {
    #[must_use]
    pub const fn with_mode(mode: DeleteMode) -> Self {
        Self { mode }
    }

    /// Set `col` to `value` on every row of `cond`, optionally narrowed to `recipient`.
    async fn update_flag(
        db: &DatabaseTransaction,
        cond: Condition,
        recipient: Option<&Uuid>,
        col: Column,
        value: bool,
    ) -> Result<u64> {
        let rows = Entity::update_many()
            .col_expr(col, Expr::value(value))
            .col_expr(Column::UpdatedAt, Expr::value(now_millis()))
            .filter(
                cond.add_option(recipient.map(|x| Column::Recipient.eq(*x)))
                    .into_filter(),
            )
            .exec(db)
            .await?
            .rows_affected;
        info!(
            column = ?col,
            value,
            rows,
            recipient = ?recipient,
            "Notifications updated"
        );
        Ok(rows)
    }
}

#[async_trait]
impl NotificationQuerySet for DefaultNotificationQuerySet {
    fn mode(&self) -> DeleteMode {
        self.mode
    }

    fn unread(&self, cond: Condition) -> Condition {
        let cond = cond.add(Column::IsRead.eq(false));
        if self.mode.is_soft() {
            cond.add(Column::IsDeleted.eq(false))
        } else {
            // `is_deleted` is not maintained in hard mode, skip the extra predicate.
            cond
        }
    }

    fn read(&self, cond: Condition) -> Condition {
        let cond = cond.add(Column::IsRead.eq(true));
        if self.mode.is_soft() {
            cond.add(Column::IsDeleted.eq(false))
        } else {
            cond
        }
    }

    fn deleted(&self, cond: Condition) -> Result<Condition> {
        self.mode.ensure_soft()?;
        Ok(cond.add(Column::IsDeleted.eq(true)))
    }

    fn active(&self, cond: Condition) -> Result<Condition> {
        self.mode.ensure_soft()?;
        Ok(cond.add(Column::IsDeleted.eq(false)))
    }

    async fn mark_all_as_read(
        &self,
        db: &DatabaseTransaction,
        cond: Condition,
        recipient: Option<&Uuid>,
    ) -> Result<u64> {
        debug!(mode = ?self.mode, "Mark all as read");
        Self::update_flag(db, self.unread(cond), recipient, Column::IsRead, true).await
    }

    async fn mark_all_as_unread(
        &self,
        db: &DatabaseTransaction,
        cond: Condition,
        recipient: Option<&Uuid>,
    ) -> Result<u64> {
        debug!(mode = ?self.mode, "Mark all as unread");
        Self::update_flag(db, self.read(cond), recipient, Column::IsRead, false).await
    }

    async fn mark_all_as_deleted(
        &self,
        db: &DatabaseTransaction,
        cond: Condition,
        recipient: Option<&Uuid>,
    ) -> Result<u64> {
        let cond = self.active(cond)?;
        Self::update_flag(db, cond, recipient, Column::IsDeleted, true).await
    }

    async fn mark_all_as_active(
        &self,
        db: &DatabaseTransaction,
        cond: Condition,
        recipient: Option<&Uuid>,
    ) -> Result<u64> {
        let cond = self.deleted(cond)?;
        Self::update_flag(db, cond, recipient, Column::IsDeleted, false).await
    }
}
