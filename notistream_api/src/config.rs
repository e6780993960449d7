use ::config::FileFormat;
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;
use validator::Validate;

use crate::Error;

pub const DEFAULT_ACTION_MANAGER: &str = "notistream::DefaultActionManager";
pub const DEFAULT_NOTIFICATION_MANAGER: &str = "notistream::DefaultNotificationManager";
pub const DEFAULT_NOTIFICATION_QUERYSET: &str = "notistream::DefaultNotificationQuerySet";

#[derive(Serialize, Deserialize, Debug, Validate, Clone)]
pub struct ConfigDatabase {
    #[validate(length(min = 1))]
    pub dsn: String,
}

/// The `ACTSTREAM_SETTINGS` mapping.
///
/// Keys are upper case like the activity stream settings they mirror,
/// lower case spellings are accepted as well.
#[serde_inline_default]
#[derive(Serialize, Deserialize, Debug, Validate, Clone, PartialEq, Eq)]
pub struct ActstreamSettings {
    #[serde(rename = "MANAGER", alias = "manager")]
    #[serde_inline_default(DEFAULT_ACTION_MANAGER.into())]
    #[validate(length(min = 1))]
    pub manager: String,

    #[serde(rename = "NOTIFICATION_MANAGER", alias = "notification_manager")]
    #[serde_inline_default(DEFAULT_NOTIFICATION_MANAGER.into())]
    #[validate(length(min = 1))]
    pub notification_manager: String,

    #[serde(rename = "NOTIFICATION_QUERYSET", alias = "notification_queryset")]
    #[serde_inline_default(DEFAULT_NOTIFICATION_QUERYSET.into())]
    #[validate(length(min = 1))]
    pub notification_queryset: String,

    #[serde(
        rename = "NOTIFICATIONS_SOFT_DELETE",
        alias = "notifications_soft_delete",
        default
    )]
    pub notifications_soft_delete: bool,

    /// Consumed by the activity stream feeds, not here.
    #[serde(rename = "FETCH_RELATIONS", alias = "fetch_relations")]
    #[serde_inline_default(true)]
    pub fetch_relations: bool,

    /// Consumed by the activity stream action data, not here.
    #[serde(rename = "USE_JSONFIELD", alias = "use_jsonfield", default)]
    pub use_jsonfield: bool,
}

impl Default for ActstreamSettings {
    fn default() -> Self {
        Self {
            manager: DEFAULT_ACTION_MANAGER.to_owned(),
            notification_manager: DEFAULT_NOTIFICATION_MANAGER.to_owned(),
            notification_queryset: DEFAULT_NOTIFICATION_QUERYSET.to_owned(),
            notifications_soft_delete: false,
            fetch_relations: true,
            use_jsonfield: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Validate, Clone)]
pub struct Config {
    #[validate(nested)]
    pub database: ConfigDatabase,
    #[serde(default)]
    #[validate(nested)]
    pub actstream: ActstreamSettings,
}

impl Config {
    fn from_source(cfg: ::config::Config) -> Result<Self, Error> {
        let ret: Self = cfg.try_deserialize()?;
        ret.validate()?;
        Ok(ret)
    }
}

/// Load config from `path`, the format is guessed from the extension.
///
/// # Errors
///
/// Will return `Err` when the file cannot be read or is invalid.
pub fn load_file<S: AsRef<str>>(path: S) -> Result<Config, Error> {
    let cfg = ::config::Config::builder()
        .add_source(::config::File::with_name(path.as_ref()))
        .build()?;
    Config::from_source(cfg)
}

/// Load config from an in-memory document.
///
/// # Errors
///
/// Will return `Err` when the document is invalid.
pub fn load_str(s: &str, format: FileFormat) -> Result<Config, Error> {
    let cfg = ::config::Config::builder()
        .add_source(::config::File::from_str(s, format))
        .build()?;
    Config::from_source(cfg)
}
