//! Explicit user context for manager operations.

use uuid::Uuid;

use crate::Error;

/// Session-scoped user handle passed into the managers.
///
/// Replaces any notion of ambient, process-wide auth state: whoever
/// constructs a manager decides which user it acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    user_id: Option<Uuid>,
}

impl Session {
    /// A session acting for a signed-in user.
    pub fn authenticated(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// A session with no user context. Operations that need a user yield
    /// [`Error::NotAuthenticated`].
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// The session's user, or [`Error::NotAuthenticated`].
    pub fn user_id(&self) -> Result<Uuid, Error> {
        self.user_id.ok_or(Error::NotAuthenticated)
    }
}
