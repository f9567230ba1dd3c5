//! # Session & Identity Provider
//!
//! Authentication is delegated entirely to a hosted identity provider. This module only
//! defines the seam ([`IdentityProvider`]), the explicit [`Session`] capability handed to
//! the rest of the app, and [`AuthFlow`], which validates form input before calling the
//! provider and turns provider failures into messages fit for the screen.

use crate::profile::{validate_credentials, validate_sign_up, ValidationError};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// The provider has not reported yet.
    #[default]
    Loading,
    SignedIn,
    SignedOut,
}

/// Explicit session capability.
///
/// Passed to [`AppSystem::start`](crate::lifecycle::AppSystem::start) and from there to
/// the HTTP client; nothing in the crate reads session state from anywhere else.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    status: SessionStatus,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("status", &self.status)
            .finish()
    }
}

impl Session {
    pub fn anonymous() -> Self {
        Self {
            token: None,
            status: SessionStatus::SignedOut,
        }
    }

    pub fn signed_in(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            status: SessionStatus::SignedIn,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_signed_in(&self) -> bool {
        self.status == SessionStatus::SignedIn
    }
}

/// Sign-up that still needs the emailed code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    pub email: String,
    pub attempt_id: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The provider rejected the request; the message is the provider's own.
    #[error("{0}")]
    Rejected(String),
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Hosted identity provider. Credential checking happens there, never in this crate.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError>;

    /// Creates the account and sends a verification code by email.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<PendingVerification, IdentityError>;

    async fn verify(
        &self,
        pending: &PendingVerification,
        code: &str,
    ) -> Result<Session, IdentityError>;

    async fn sign_out(&self, session: &Session) -> Result<(), IdentityError>;
}

/// Why an auth form action did not complete.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// Provider failure, already phrased for the user.
    #[error("{0}")]
    Failed(String),
}

/// Form-level wrapper around an [`IdentityProvider`].
pub struct AuthFlow<P: IdentityProvider> {
    provider: P,
}

impl<P: IdentityProvider> AuthFlow<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        validate_credentials(email, password)?;
        let session = self
            .provider
            .sign_in(email.trim(), password)
            .await
            .map_err(|e| user_facing(e, "Failed to sign in"))?;
        info!("Signed in");
        Ok(session)
    }

    #[instrument(skip(self, password, confirm))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<PendingVerification, AuthError> {
        validate_sign_up(email, password, confirm)?;
        self.provider
            .sign_up(email.trim(), password)
            .await
            .map_err(|e| user_facing(e, "Failed to sign up"))
    }

    #[instrument(skip(self, code))]
    pub async fn verify(
        &self,
        pending: &PendingVerification,
        code: &str,
    ) -> Result<Session, AuthError> {
        if code.trim().is_empty() {
            return Err(ValidationError::MissingCode.into());
        }
        self.provider
            .verify(pending, code.trim())
            .await
            .map_err(|e| user_facing(e, "Failed to verify email"))
    }

    #[instrument(skip(self, session))]
    pub async fn sign_out(&self, session: &Session) -> Result<Session, AuthError> {
        self.provider
            .sign_out(session)
            .await
            .map_err(|e| user_facing(e, "Failed to sign out. Please try again."))?;
        info!("Signed out");
        Ok(Session::anonymous())
    }
}

/// Keeps the provider's own rejection message, hides transport details.
fn user_facing(e: IdentityError, fallback: &str) -> AuthError {
    warn!(error = %e, "Identity provider call failed");
    match e {
        IdentityError::Rejected(message) if !message.trim().is_empty() => {
            AuthError::Failed(message)
        }
        _ => AuthError::Failed(fallback.to_string()),
    }
}
