// Bearer token authentication for protected routes.
// Controllers call `resolve_claims` first and pass the claims down explicitly.

use actix_web::HttpRequest;

use crate::errors::WrError;
use crate::identity::{AccountClaims, ClaimsVerifier};

pub fn extract_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn resolve_claims(verifier: &dyn ClaimsVerifier, req: &HttpRequest) -> Result<AccountClaims, WrError> {
    let token = extract_token(req)
        .ok_or_else(|| WrError::auth_client("No authorization token provided"))?;
    verifier.verify(&token)
}
