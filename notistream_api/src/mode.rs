use crate::{Error, config::ActstreamSettings};

/// How a notification is deleted, fixed at startup from `NOTIFICATIONS_SOFT_DELETE`.
///
/// The mode also decides whether `unread`/`read` filter on `is_deleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeleteMode {
    /// Rows are removed, `is_deleted` is never consulted.
    #[default]
    Hard,
    /// Rows are flagged with `is_deleted` and kept.
    Soft,
}

impl DeleteMode {
    #[must_use]
    pub const fn from_soft_delete(enable: bool) -> Self {
        if enable { Self::Soft } else { Self::Hard }
    }

    #[must_use]
    pub const fn is_soft(self) -> bool {
        matches!(self, Self::Soft)
    }

    /// # Errors
    ///
    /// Will return `Err` when soft delete is disabled.
    pub fn ensure_soft(self) -> Result<(), Error> {
        match self {
            Self::Soft => Ok(()),
            Self::Hard => Err(Error::SoftDeleteDisabled),
        }
    }
}

impl From<&ActstreamSettings> for DeleteMode {
    fn from(value: &ActstreamSettings) -> Self {
        Self::from_soft_delete(value.notifications_soft_delete)
    }
}
