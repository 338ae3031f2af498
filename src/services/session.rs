// Session Service
// Signed-in identity as an explicit value with defined init and teardown

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot sign in without an email address")]
    MissingEmail,
    #[error("session lifetime must be positive")]
    InvalidLifetime,
}

/// Whether analysis requires a signed-in session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AccessPolicy {
    #[default]
    Open,
    SignInRequired,
}

impl FromStr for AccessPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(AccessPolicy::Open),
            "sign-in-required" | "signin" | "sign-in" => Ok(AccessPolicy::SignInRequired),
            other => Err(format!("unknown access policy: {}", other)),
        }
    }
}

impl fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessPolicy::Open => write!(f, "open"),
            AccessPolicy::SignInRequired => write!(f, "sign-in-required"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    SignedIn(Session),
}

impl SessionState {
    /// Start a session after the identity provider has authenticated `email`.
    /// Any previous session is replaced.
    pub fn sign_in(
        &mut self,
        email: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<&Session, SessionError> {
        let email = email.trim();
        if email.is_empty() {
            self.sign_out();
            return Err(SessionError::MissingEmail);
        }
        if ttl <= Duration::zero() {
            return Err(SessionError::InvalidLifetime);
        }

        *self = SessionState::SignedIn(Session {
            email: email.to_string(),
            signed_in_at: now,
            expires_at: now + ttl,
        });
        info!(expires_at = %(now + ttl), "session.signed_in");

        self.current(now).ok_or(SessionError::InvalidLifetime)
    }

    pub fn sign_out(&mut self) {
        if matches!(self, SessionState::SignedIn(_)) {
            info!("session.signed_out");
        }
        *self = SessionState::Anonymous;
    }

    /// Live session, if any. An expired session is torn down here.
    pub fn current(&mut self, now: DateTime<Utc>) -> Option<&Session> {
        let expired = matches!(self, SessionState::SignedIn(s) if !s.is_live(now));
        if expired {
            info!("session.expired");
            *self = SessionState::Anonymous;
        }
        match self {
            SessionState::SignedIn(session) => Some(&*session),
            SessionState::Anonymous => None,
        }
    }
}
