extern crate self as notistream_api;

pub mod config;
pub mod entity;
pub mod error;
pub mod handler;
pub mod handler_impl;
pub mod mode;
pub mod registry;
pub mod request;

pub use anyhow;
pub use async_trait;
pub use sea_orm;
pub use uuid;
pub use validator;

pub use error::Error;
pub use mode::DeleteMode;
pub use registry::Registry;
pub use request::{Condition, PaginationParam};

use chrono::Utc;
use config::ActstreamSettings;
use handler::{ActionManager, NotificationManager, NotificationQuerySet};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current unix time in milliseconds, used for `created_at`/`updated_at`.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Main entrance holding the resolved notification components.
///
/// Built once at startup, either by [`Registry::build`] from settings or
/// directly with [`Notistream::new`] when the host injects its own managers.
pub struct Notistream {
    pub notification: Box<dyn NotificationManager>,
    pub action: Box<dyn ActionManager>,
    pub settings: ActstreamSettings,
}

impl Notistream {
    #[must_use]
    pub fn new(
        settings: ActstreamSettings,
        notification: Box<dyn NotificationManager>,
        action: Box<dyn ActionManager>,
    ) -> Self {
        Self {
            notification,
            action,
            settings,
        }
    }

    /// Query set the notification manager was built from.
    #[must_use]
    pub fn queryset(&self) -> &dyn NotificationQuerySet {
        self.notification.queryset()
    }

    #[must_use]
    pub fn mode(&self) -> DeleteMode {
        self.notification.mode()
    }
}
