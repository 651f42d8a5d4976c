pub mod auth;
pub mod bookmark;
pub mod checkin;
pub mod dog;
pub mod dogrun;
pub mod health;

use actix_web::{web, HttpRequest};

use crate::errors::{ErrorDomain, ErrorKind, WrError};
use crate::identity::AccountClaims;
use crate::middleware::session_auth::resolve_claims;
use crate::AppState;

/// Resolve the caller from the bearer token
pub(crate) fn caller(state: &web::Data<AppState>, req: &HttpRequest) -> Result<AccountClaims, WrError> {
    resolve_claims(state.claims_verifier.as_ref(), req)
}

/// Run blocking manager/database work on the actix blocking pool
pub(crate) async fn run_blocking<F, R>(f: F) -> Result<R, WrError>
where
    F: FnOnce() -> Result<R, WrError> + Send + 'static,
    R: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| WrError::unexpected(format!("Blocking task failed: {}", e)))?
}

/// JSON extractor config: body limit plus errors in the service error format
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            WrError::new(
                ErrorDomain::Other,
                ErrorKind::Client,
                format!("Invalid request body: {}", err),
            )
            .into()
        })
}
