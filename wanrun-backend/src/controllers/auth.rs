//! Session endpoints
//!
//! Tokens are issued outside this service; only revocation lives here.

use actix_web::{web, HttpRequest, HttpResponse};

use super::{caller, run_blocking};
use crate::errors::WrError;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/auth").route("/revoke", web::post().to(revoke)));
}

async fn revoke(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, WrError> {
    let claims = caller(&state, &req)?;

    let db = state.db.clone();
    run_blocking(move || {
        db.delete_session(&claims.jti)
            .map_err(|e| WrError::auth_server("Failed to revoke session").with_source(e))
    })
    .await?;

    log::info!("[AUTH] Session revoked");
    Ok(HttpResponse::NoContent().finish())
}
