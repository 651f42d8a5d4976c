//! Read-only dog endpoints

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use super::{caller, run_blocking};
use crate::errors::{ErrorDomain, ErrorKind, WrError};
use crate::models::Dog;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DogResponse {
    #[serde(rename = "dogID")]
    dog_id: i64,
    #[serde(rename = "dogOwnerID")]
    dog_owner_id: i64,
    name: String,
    weight: Option<i64>,
    sex: Option<String>,
    image: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<Dog> for DogResponse {
    fn from(dog: Dog) -> Self {
        Self {
            dog_id: dog.id,
            dog_owner_id: dog.dog_owner_id,
            name: dog.name,
            weight: dog.weight,
            sex: dog.sex,
            image: dog.image,
            created_at: dog.created_at.to_rfc3339(),
            updated_at: dog.updated_at.to_rfc3339(),
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dog")
            .route("/owned/{dog_owner_id}", web::get().to(list_owned_dogs))
            .route("/detail/{dog_id}", web::get().to(get_dog)),
    );
}

async fn list_owned_dogs(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, WrError> {
    caller(&state, &req)?;
    let dog_owner_id = path.into_inner();

    let db = state.db.clone();
    let dogs = run_blocking(move || {
        let owner = db
            .get_dog_owner(dog_owner_id)
            .map_err(|e| WrError::dog_server("Failed to look up dog owner").with_source(e))?;
        if owner.is_none() {
            return Err(WrError::new(
                ErrorDomain::DogOwner,
                ErrorKind::Client,
                format!("Dog owner not found: {}", dog_owner_id),
            ));
        }

        db.list_dogs_by_owner(dog_owner_id)
            .map_err(|e| WrError::dog_server("Failed to list dogs").with_source(e))
    })
    .await?;

    let dogs: Vec<DogResponse> = dogs.into_iter().map(DogResponse::from).collect();
    Ok(HttpResponse::Ok().json(dogs))
}

async fn get_dog(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, WrError> {
    caller(&state, &req)?;
    let dog_id = path.into_inner();

    let db = state.db.clone();
    let dog = run_blocking(move || {
        db.get_dog(dog_id)
            .map_err(|e| WrError::dog_server("Failed to look up dog").with_source(e))?
            .ok_or_else(|| WrError::dog_client(format!("Dog not found: {}", dog_id)))
    })
    .await?;

    Ok(HttpResponse::Ok().json(DogResponse::from(dog)))
}
