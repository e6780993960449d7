use std::{fmt, str::FromStr};

use notistream_macro::{entity_behavior, entity_id, entity_timestamp};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::Error;

/// Severity of a notification, stored as its integer value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize_repr,
    Deserialize_repr,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[repr(i32)]
pub enum NotificationLevel {
    #[default]
    #[sea_orm(num_value = 0)]
    Info = 0,
    #[sea_orm(num_value = 1)]
    Warning = 1,
    #[sea_orm(num_value = 2)]
    Error = 2,
    #[sea_orm(num_value = 3)]
    Critical = 3,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Critical => "Critical",
        })
    }
}

impl FromStr for NotificationLevel {
    type Err = Error;

    /// Accept either the name (any case) or the integer value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" | "0" => Ok(Self::Info),
            "warning" | "1" => Ok(Self::Warning),
            "error" | "2" => Ok(Self::Error),
            "critical" | "3" => Ok(Self::Critical),
            _ => Err(Error::InvalidLevel(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Default, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub recipient: Uuid,
    pub action: Uuid,
    pub is_read: bool,
    pub is_deleted: bool,
    pub level: NotificationLevel,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[entity_id(Uuid::new_v4())]
#[entity_timestamp]
impl ActiveModel {}

#[entity_behavior]
impl ActiveModelBehavior for ActiveModel {}
