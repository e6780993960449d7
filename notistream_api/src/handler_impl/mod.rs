pub mod actions;
pub mod notifications;
pub mod queryset;

pub use actions::DefaultActionManager;
pub use notifications::DefaultNotificationManager;
pub use queryset::DefaultNotificationQuerySet;
