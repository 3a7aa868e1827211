use crate::model::UserProfile;
use serde::Serialize;

/// Identity of the logged-in user, held by the caller and passed to every
/// data operation.
///
/// A session is a snapshot: logging out does not invalidate sessions already
/// handed out, and data calls made with one are scoped to its user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    user_id: String,
    email: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl From<&UserProfile> for Session {
    fn from(profile: &UserProfile) -> Self {
        Session::new(profile.uid.clone(), profile.email.clone())
    }
}
