//! Verified caller identity
//!
//! Claims are resolved once per request and then passed explicitly to every
//! manager call.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::db::Database;
use crate::errors::WrError;

/// Identity of the authenticated dog owner making the call
#[derive(Debug, Clone, PartialEq)]
pub struct AccountClaims {
    pub dog_owner_id: i64,
    /// Session token id
    pub jti: String,
    pub expires_at: DateTime<Utc>,
}

/// Turns a bearer token into verified claims
pub trait ClaimsVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AccountClaims, WrError>;
}

/// Verifies tokens against the auth_sessions table
pub struct SessionClaimsVerifier {
    db: Arc<Database>,
}

impl SessionClaimsVerifier {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl ClaimsVerifier for SessionClaimsVerifier {
    fn verify(&self, token: &str) -> Result<AccountClaims, WrError> {
        let session = self
            .db
            .get_session(token)
            .map_err(|e| WrError::auth_server("Failed to validate session").with_source(e))?
            .ok_or_else(|| WrError::auth_client("Invalid or expired session"))?;

        if session.is_expired(Utc::now()) {
            return Err(WrError::auth_client("Invalid or expired session"));
        }

        Ok(AccountClaims {
            dog_owner_id: session.dog_owner_id,
            jti: session.token,
            expires_at: session.expires_at,
        })
    }
}
