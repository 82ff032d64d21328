//! Email and password for a Directus user.

use std::fmt;

/// A Directus user's email and password, posted to `/auth/login`.
///
/// The client keeps these after a successful login so a session can be
/// re-established with `relogin` once the refresh token is gone. `Debug`
/// prints the email only.
///
/// # Example
///
/// ```
/// use directus::Credentials;
///
/// let creds = Credentials::new("admin@example.com", "password");
/// assert_eq!(creds.email(), "admin@example.com");
/// ```
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// The email the user signs in with.
    pub fn email(&self) -> &str {
        &self.email
    }

    // Only the login request body reads this.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
