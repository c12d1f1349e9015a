//! OAuth credential holder.
//!
//! Built once per successful delegated-authorization event from the token
//! pair the external strategy hands back, plus the application key known up
//! front. Immutable thereafter; re-authorization replaces the whole value.

use connector::ConnectorError;

/// The authenticated session's credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    app_key: String,
    access_token: String,
    token_secret: String,
}

impl OAuthCredentials {
    /// Validates and stores the output of a completed authorization flow.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::MissingCredential`] naming the first field
    /// that is empty. Nothing is stored on failure.
    pub fn from_authorization(
        app_key: impl Into<String>,
        access_token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Result<Self, ConnectorError> {
        let app_key = require("application key", app_key.into())?;
        let access_token = require("access token", access_token.into())?;
        let token_secret = require("token secret", token_secret.into())?;
        Ok(Self {
            app_key,
            access_token,
            token_secret,
        })
    }

    /// The application (consumer) key the session binds to.
    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    /// The delegated access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The token secret paired with the access token.
    ///
    /// Held for the lifetime of the credentials; the read-only API calls this
    /// connector issues authenticate with key + token only.
    pub fn token_secret(&self) -> &str {
        &self.token_secret
    }
}

fn require(field: &'static str, value: String) -> Result<String, ConnectorError> {
    if value.is_empty() {
        Err(ConnectorError::MissingCredential { field })
    } else {
        Ok(value)
    }
}
