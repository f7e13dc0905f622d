use chrono::{DateTime, Utc};

use super::{
    display_name::DisplayName, email::Email, password::Password,
    verification_token::VerificationToken,
};

/// A signup that has not been confirmed yet.
///
/// It lives only in the ephemeral store, under its verification token, until
/// it is promoted, superseded by a resend, revoked or expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRegistration {
    pub email: Email,
    pub display_name: DisplayName,
    pub password: Password,
    pub created_at: DateTime<Utc>,
}

impl PendingRegistration {
    pub fn new(email: Email, display_name: DisplayName, password: Password) -> Self {
        Self {
            email,
            display_name,
            password,
            created_at: Utc::now(),
        }
    }
}

/// Operator view of a pending registration; never carries the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSummary {
    pub token: VerificationToken,
    pub email: Email,
    pub display_name: DisplayName,
    pub created_at: DateTime<Utc>,
}

impl PendingSummary {
    pub fn new(token: VerificationToken, registration: &PendingRegistration) -> Self {
        Self {
            token,
            email: registration.email.clone(),
            display_name: registration.display_name.clone(),
            created_at: registration.created_at,
        }
    }
}
