use std::collections::HashMap;

use tracing::debug;

use crate::{
    DeleteMode, Error, Notistream,
    config::{
        ActstreamSettings, DEFAULT_ACTION_MANAGER, DEFAULT_NOTIFICATION_MANAGER,
        DEFAULT_NOTIFICATION_QUERYSET,
    },
    handler::{ActionManager, NotificationManager, NotificationQuerySet},
    handler_impl::{DefaultActionManager, DefaultNotificationManager, DefaultNotificationQuerySet},
};

type QuerySetFactory = Box<dyn Fn(DeleteMode) -> Box<dyn NotificationQuerySet> + Send + Sync>;
type ManagerFactory =
    Box<dyn Fn(Box<dyn NotificationQuerySet>) -> Box<dyn NotificationManager> + Send + Sync>;
type ActionFactory = Box<dyn Fn() -> Box<dyn ActionManager> + Send + Sync>;

/// Named implementations the settings can refer to.
///
/// The defaults are registered under the `DEFAULT_*` names of [`crate::config`].
/// Hosts register their own implementations before calling [`Registry::build`].
///
/// # Examples
/// ```ignore
/// let notistream = Registry::new()
///     .register_queryset("host::QuerySet", |mode| Box::new(HostQuerySet::new(mode)))
///     .build(&settings)?;
/// ```
pub struct Registry {
    queryset: HashMap<String, QuerySetFactory>,
    manager: HashMap<String, ManagerFactory>,
    action: HashMap<String, ActionFactory>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queryset: HashMap::new(),
            manager: HashMap::new(),
            action: HashMap::new(),
        }
        .register_queryset(DEFAULT_NOTIFICATION_QUERYSET, |mode| {
            Box::new(DefaultNotificationQuerySet::with_mode(mode))
        })
        .register_manager(DEFAULT_NOTIFICATION_MANAGER, |qs| {
            Box::new(DefaultNotificationManager::new(qs))
        })
        .register_action(DEFAULT_ACTION_MANAGER, || Box::new(DefaultActionManager::new()))
    }

    #[must_use]
    pub fn register_queryset<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(DeleteMode) -> Box<dyn NotificationQuerySet> + Send + Sync + 'static,
    {
        self.queryset.insert(name.to_owned(), Box::new(f));
        self
    }

    /// The factory receives the resolved query set.
    #[must_use]
    pub fn register_manager<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(Box<dyn NotificationQuerySet>) -> Box<dyn NotificationManager>
            + Send
            + Sync
            + 'static,
    {
        self.manager.insert(name.to_owned(), Box::new(f));
        self
    }

    #[must_use]
    pub fn register_action<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn() -> Box<dyn ActionManager> + Send + Sync + 'static,
    {
        self.action.insert(name.to_owned(), Box::new(f));
        self
    }

    fn lookup<'a, T>(
        map: &'a HashMap<String, T>,
        key: &'static str,
        path: &str,
    ) -> Result<&'a T, Error> {
        map.get(path).ok_or_else(|| Error::Unresolved {
            key,
            path: path.to_owned(),
        })
    }

    /// Resolve every configured implementation, failing on the first unknown name.
    ///
    /// # Errors
    ///
    /// Will return [`Error::Unresolved`] naming the offending settings key.
    pub fn build(&self, settings: &ActstreamSettings) -> Result<Notistream, Error> {
        let mode = DeleteMode::from(settings);
        let queryset = Self::lookup(
            &self.queryset,
            "NOTIFICATION_QUERYSET",
            &settings.notification_queryset,
        )?;
        let manager = Self::lookup(
            &self.manager,
            "NOTIFICATION_MANAGER",
            &settings.notification_manager,
        )?;
        let action = Self::lookup(&self.action, "MANAGER", &settings.manager)?;
        debug!(
            queryset = %settings.notification_queryset,
            manager = %settings.notification_manager,
            action = %settings.manager,
            ?mode,
            "Notification components resolved"
        );

        Ok(Notistream::new(
            settings.clone(),
            manager(queryset(mode)),
            action(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unresolved_key(settings: &ActstreamSettings) -> (&'static str, String) {
        match Registry::new().build(settings) {
            Err(Error::Unresolved { key, path }) => (key, path),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("resolution should fail"),
        }
    }

    #[test]
    fn defaults_resolve() {
        let settings = ActstreamSettings {
            notifications_soft_delete: true,
            ..Default::default()
        };
        let notistream = Registry::new().build(&settings).unwrap();
        assert_eq!(notistream.mode(), DeleteMode::Soft);
        assert_eq!(notistream.queryset().mode(), DeleteMode::Soft);
        assert_eq!(notistream.settings, settings);
    }

    #[test]
    fn unknown_names_name_their_key() {
        let settings = ActstreamSettings {
            notification_queryset: "missing::QuerySet".to_owned(),
            ..Default::default()
        };
        assert_eq!(
            unresolved_key(&settings),
            ("NOTIFICATION_QUERYSET", "missing::QuerySet".to_owned())
        );

        let settings = ActstreamSettings {
            notification_manager: "missing::Manager".to_owned(),
            ..Default::default()
        };
        assert_eq!(unresolved_key(&settings).0, "NOTIFICATION_MANAGER");

        let settings = ActstreamSettings {
            manager: "missing::ActionManager".to_owned(),
            ..Default::default()
        };
        assert_eq!(unresolved_key(&settings).0, "MANAGER");
    }

    #[test]
    fn host_implementation_is_used() {
        let settings = ActstreamSettings {
            notification_queryset: "host::AlwaysSoft".to_owned(),
            ..Default::default()
        };
        let notistream = Registry::new()
            .register_queryset("host::AlwaysSoft", |_| {
                Box::new(DefaultNotificationQuerySet::with_mode(DeleteMode::Soft))
            })
            .build(&settings)
            .unwrap();
        assert!(notistream.mode().is_soft());
    }

    #[test]
    fn error_message_names_key() {
        let err = Error::Unresolved {
            key: "MANAGER",
            path: "x::Y".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "cannot resolve `x::Y`, try fixing ACTSTREAM_SETTINGS[MANAGER]"
        );
    }
}
