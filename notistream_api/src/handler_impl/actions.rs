use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use derivative::Derivative;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, Set};
use tracing::info;
use uuid::Uuid;

use crate::{
    Condition,
    entity::notifications::{self, NotificationLevel},
    handler::ActionManager,
    now_millis,
};

#[derive(Derivative)]
#[derivative(Default(new = "true"), Debug)]
pub struct DefaultActionManager;

#[async_trait]
impl ActionManager for DefaultActionManager {
    async fn fan_out(
        &self,
        db: &DatabaseTransaction,
        action: &Uuid,
        recipients: &[Uuid],
        level: NotificationLevel,
    ) -> Result<u64> {
        let mut seen = HashSet::with_capacity(recipients.len());
        let recipients: Vec<_> = recipients.iter().filter(|x| seen.insert(**x)).collect();
        if recipients.is_empty() {
            return Ok(0);
        }

        // Bulk inserts skip `ActiveModelBehavior`, fill id and timestamps here.
        let ts = now_millis();
        let rows = notifications::Entity::insert_many(recipients.into_iter().map(|x| {
            notifications::ActiveModel {
                id: Set(Uuid::new_v4()),
                recipient: Set(*x),
                action: Set(*action),
                is_read: Set(false),
                is_deleted: Set(false),
                level: Set(level),
                created_at: Set(ts),
                updated_at: Set(ts),
            }
        }))
        .exec_without_returning(db)
        .await?;
        info!(%action, rows, "Action fanned out");
        Ok(rows)
    }

    async fn notifications(
        &self,
        db: &DatabaseTransaction,
        action: &Uuid,
        cond: Condition,
    ) -> Result<Vec<notifications::Model>> {
        let (q, _) = cond
            .add(notifications::Column::Action.eq(*action))
            .build(notifications::Entity::find());
        q.all(db).await.map_err(Into::into)
    }
}
