//! Dogrun detail endpoint (local catalog only)

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use super::{caller, run_blocking};
use crate::errors::WrError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DogrunDetailResponse {
    #[serde(rename = "dogrunID")]
    dogrun_id: i64,
    #[serde(rename = "placeID")]
    place_id: Option<String>,
    name: String,
    address: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    /// Dogs checked in at this dogrun today
    #[serde(rename = "todayCheckinDogIDs")]
    today_checkin_dog_ids: Vec<i64>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/dogrun/{dogrun_id}").route(web::get().to(get_dogrun)));
}

async fn get_dogrun(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, WrError> {
    caller(&state, &req)?;
    let dogrun_id = path.into_inner();

    let db = state.db.clone();
    let response = run_blocking(move || {
        let dogrun = db
            .get_dogrun(dogrun_id)
            .map_err(|e| WrError::dogrun_server("Failed to look up dogrun").with_source(e))?
            .ok_or_else(|| WrError::dogrun_client(format!("Dogrun not found: {}", dogrun_id)))?;

        let checkins = db
            .list_checkins_on(dogrun_id, db.today())
            .map_err(|e| WrError::interaction_server("Failed to list check-ins").with_source(e))?;

        Ok(DogrunDetailResponse {
            dogrun_id: dogrun.id,
            place_id: dogrun.place_id,
            name: dogrun.name,
            address: dogrun.address,
            latitude: dogrun.latitude,
            longitude: dogrun.longitude,
            today_checkin_dog_ids: checkins.into_iter().map(|c| c.dog_id).collect(),
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(response))
}
