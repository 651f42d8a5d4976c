//! Dogrun check-in endpoint

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use super::{caller, run_blocking};
use crate::errors::WrError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckinRequest {
    #[serde(rename = "dogrunID")]
    dogrun_id: i64,
    #[serde(rename = "dogIDs")]
    dog_ids: Vec<i64>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/dogrun/checkin").route(web::post().to(checkin_dogrun)));
}

async fn checkin_dogrun(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CheckinRequest>,
) -> Result<HttpResponse, WrError> {
    let claims = caller(&state, &req)?;
    let CheckinRequest { dogrun_id, dog_ids } = body.into_inner();

    let manager = state.checkins.clone();
    run_blocking(move || manager.checkin_dogrun(&claims, dogrun_id, &dog_ids)).await?;

    Ok(HttpResponse::NoContent().finish())
}
