//! The signed-in user, passed explicitly into every request.
//!
//! Authentication itself happens elsewhere; a session only carries the OAuth
//! access token it produced and the user's own calendar address.

use crate::error::{Result, SuggestError};

#[derive(Clone, Default)]
pub struct Session {
    access_token: Option<String>,
    user_email: Option<String>,
}

impl Session {
    pub fn new(access_token: Option<String>, user_email: Option<String>) -> Self {
        Self {
            access_token: access_token.filter(|t| !t.trim().is_empty()),
            user_email: user_email
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
        }
    }

    /// A session with no token. Every provider call made with it fails with
    /// `NotAuthenticated`.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// # Errors
    /// Returns `SuggestError::NotAuthenticated` when no token is present.
    pub fn access_token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .ok_or(SuggestError::NotAuthenticated)
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("user_email", &self.user_email)
            .finish()
    }
}
