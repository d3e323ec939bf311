//! Mock credential flows on top of [`SessionStore`].
//!
//! There is no account server: login accepts any non-empty email/password
//! pair, signup any non-empty triple.  Success persists the user; failure is
//! an [`AuthError`], never a panic.

use thiserror::Error;

use super::store::{SessionStore, User};

// ---------------------------------------------------------------------------
// AuthError
// ---------------------------------------------------------------------------

/// Errors raised by the auth flows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login with an empty email or password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Signup with an empty name, email or password.
    #[error("invalid information")]
    InvalidInformation,

    /// The session blob could not be written or cleared.
    #[error("failed to update session: {0}")]
    Store(String),
}

// ---------------------------------------------------------------------------
// AuthService
// ---------------------------------------------------------------------------

/// Login / signup / logout over a [`SessionStore`].
pub struct AuthService {
    store: SessionStore,
}

impl AuthService {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Sign in with `email` / `password`.  Both must be non-empty after
    /// trimming.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.trim().is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let user = User {
            name: None,
            email: email.to_string(),
        };
        self.store
            .set_user(&user)
            .map_err(|e| AuthError::Store(e.to_string()))?;

        log::info!("session: logged in as {email}");
        Ok(user)
    }

    /// Create an account with `name` / `email` / `password`.  All three must
    /// be non-empty after trimming.
    pub fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() || password.trim().is_empty() {
            return Err(AuthError::InvalidInformation);
        }

        let user = User {
            name: Some(name.to_string()),
            email: email.to_string(),
        };
        self.store
            .set_user(&user)
            .map_err(|e| AuthError::Store(e.to_string()))?;

        log::info!("session: signed up as {email}");
        Ok(user)
    }

    /// Sign out.  Safe when nobody is signed in.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store
            .clear_user()
            .map_err(|e| AuthError::Store(e.to_string()))?;
        log::info!("session: logged out");
        Ok(())
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.store.get_user()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn service(dir: &std::path::Path) -> AuthService {
        AuthService::new(SessionStore::at(dir.join("session.json")))
    }

    #[test]
    fn login_with_credentials_persists_user() {
        let dir = tempdir().unwrap();
        let auth = service(dir.path());

        let user = auth.login("ada@example.com", "hunter2").unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert!(user.name.is_none());
        assert_eq!(auth.current_user(), Some(user));
    }

    #[test]
    fn login_with_empty_password_fails() {
        let dir = tempdir().unwrap();
        let auth = service(dir.path());

        let err = auth.login("ada@example.com", "   ").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn signup_records_name() {
        let dir = tempdir().unwrap();
        let auth = service(dir.path());

        let user = auth.signup("Ada", "ada@example.com", "hunter2").unwrap();
        assert_eq!(user.name.as_deref(), Some("Ada"));
        assert_eq!(auth.current_user(), Some(user));
    }

    #[test]
    fn signup_with_missing_field_fails() {
        let dir = tempdir().unwrap();
        let auth = service(dir.path());

        let err = auth.signup("", "ada@example.com", "hunter2").unwrap_err();
        assert!(matches!(err, AuthError::InvalidInformation));
    }

    #[test]
    fn logout_clears_the_session() {
        let dir = tempdir().unwrap();
        let auth = service(dir.path());

        auth.login("ada@example.com", "hunter2").unwrap();
        auth.logout().unwrap();
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn logout_when_signed_out_is_ok() {
        let dir = tempdir().unwrap();
        let auth = service(dir.path());
        auth.logout().expect("logout without a session must succeed");
    }
}
