use uuid::Uuid;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Raised by every `is_deleted` query or transition while soft delete is off.
    #[error(
        "soft delete is disabled: set `NOTIFICATIONS_SOFT_DELETE` to true to use the `is_deleted` field, \
         otherwise `unread` and `read` do not filter by it"
    )]
    SoftDeleteDisabled,

    #[error("cannot resolve `{path}`, try fixing ACTSTREAM_SETTINGS[{key}]")]
    Unresolved { key: &'static str, path: String },

    #[error("notification `{0}` not found")]
    NotFound(Uuid),

    #[error("invalid notification level `{0}`")]
    InvalidLevel(String),

    #[error("config load failed: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("config invalid: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
