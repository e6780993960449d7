use sea_orm::{
    EntityTrait, Order, QueryFilter, QueryOrder, Select,
    sea_query::{ConditionExpression, SimpleExpr},
};
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;
use validator::Validate;

#[serde_inline_default]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PaginationParam {
    #[serde_inline_default(1)]
    #[validate(range(min = 1))]
    pub page: u64,
    #[serde_inline_default(10)]
    #[validate(range(min = 1, max = 100))]
    pub size: u64,
}

/// A collection of notifications described by filter, order and page.
///
/// Query sets narrow a condition, managers and bulk updates execute it.
/// Order and page only apply to reads.
#[derive(Debug, Clone)]
pub struct Condition {
    pub page: Option<PaginationParam>,
    pub cond: sea_orm::Condition,
    pub order: Vec<(SimpleExpr, Order)>,
}

impl Default for Condition {
    fn default() -> Self {
        Self::new(sea_orm::Condition::all())
    }
}

impl Condition {
    #[must_use]
    pub fn new(cond: sea_orm::Condition) -> Self {
        Self {
            cond,
            page: None,
            order: Vec::new(),
        }
    }

    #[must_use]
    pub fn add_sort(mut self, col: SimpleExpr, sort: Order) -> Self {
        self.order.push((col, sort));
        self
    }

    #[must_use]
    pub const fn add_page(mut self, page: PaginationParam) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn add<C>(mut self, condition: C) -> Self
    where
        C: Into<ConditionExpression>,
    {
        self.cond = self.cond.add(condition);
        self
    }

    #[must_use]
    pub fn add_option<C>(mut self, condition: Option<C>) -> Self
    where
        C: Into<ConditionExpression>,
    {
        self.cond = self.cond.add_option(condition);
        self
    }

    /// Filter only, for statements that ignore order and page.
    #[must_use]
    pub fn into_filter(self) -> sea_orm::Condition {
        self.cond
    }

    #[must_use]
    pub fn build<E>(self, mut q: Select<E>) -> (Select<E>, Option<PaginationParam>)
    where
        E: EntityTrait,
    {
        for i in self.order {
            q = q.order_by(i.0, i.1);
        }
        (q.filter(self.cond), self.page)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ColumnTrait, DbBackend, IntoSimpleExpr, QueryTrait};

    use super::*;
    use crate::entity::notifications::{Column, Entity};

    #[test]
    fn build_applies_filter_and_order() {
        let (q, page) = Condition::default()
            .add(Column::IsRead.eq(false))
            .add_option(None::<SimpleExpr>)
            .add_sort(Column::CreatedAt.into_simple_expr(), Order::Desc)
            .add_page(PaginationParam { page: 2, size: 5 })
            .build(Entity::find());
        let sql = q.build(DbBackend::Sqlite).to_string();
        assert!(sql.contains(r#"WHERE "notifications"."is_read" = "#));
        assert!(sql.contains(r#"ORDER BY "notifications"."created_at" DESC"#));
        assert_eq!(page, Some(PaginationParam { page: 2, size: 5 }));
    }

    #[test]
    fn empty_condition_matches_everything() {
        let (q, page) = Condition::default().build(Entity::find());
        assert!(q.build(DbBackend::Sqlite).to_string().ends_with("WHERE TRUE"));
        assert!(page.is_none());
    }
}
