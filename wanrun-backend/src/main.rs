use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod db;
mod errors;
mod facades;
mod identity;
mod interaction;
mod middleware;
mod models;
mod seed;

use config::Config;
use db::Database;
use facades::{DbDogFacade, DbDogrunFacade, DogFacade, DogrunFacade};
use identity::{ClaimsVerifier, SessionClaimsVerifier};
use interaction::{BookmarkManager, CheckinManager};

pub struct AppState {
    pub db: Arc<Database>,
    pub claims_verifier: Arc<dyn ClaimsVerifier>,
    pub bookmarks: Arc<BookmarkManager>,
    pub checkins: Arc<CheckinManager>,
}

impl AppState {
    /// Wire the production ports around one database handle
    pub fn from_database(db: Arc<Database>) -> Self {
        let dogruns: Arc<dyn DogrunFacade> = Arc::new(DbDogrunFacade::new(db.clone()));
        let dogs: Arc<dyn DogFacade> = Arc::new(DbDogFacade::new(db.clone()));

        Self {
            claims_verifier: Arc::new(SessionClaimsVerifier::new(db.clone())),
            bookmarks: Arc::new(BookmarkManager::new(db.clone(), dogruns.clone())),
            checkins: Arc::new(CheckinManager::new(db.clone(), dogruns, dogs)),
            db,
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(std::io::Error::other)?;
    let checkin_offset = config.checkin_offset().map_err(std::io::Error::other)?;
    let port = config.port;
    let max_body_bytes = config.max_body_bytes;

    log::info!("Initializing database at {}", config.database_url);
    let db = Database::new(&config.database_url, checkin_offset).map_err(|e| {
        log::error!("Failed to initialize database: {}", e);
        std::io::Error::other(e)
    })?;
    let db = Arc::new(db);

    if std::env::args().nth(1).as_deref() == Some("seed-demo") {
        let seed = seed::seed_demo(&db).map_err(std::io::Error::other)?;
        println!("dog owner: {}", seed.dog_owner_id);
        println!("dogs:      {:?}", seed.dog_ids);
        println!("dogrun:    {}", seed.dogrun_id);
        println!("token:     Bearer {}", seed.token);
        return Ok(());
    }

    log::info!("Check-in day boundary at UTC{:+}", config.checkin_utc_offset_hours);
    let state = web::Data::new(AppState::from_database(db));

    log::info!("Starting wanrun server on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(controllers::json_config(max_body_bytes))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config)
            .configure(controllers::auth::config)
            .configure(controllers::bookmark::config)
            // /dogrun/checkin must be registered before /dogrun/{dogrun_id}
            .configure(controllers::checkin::config)
            .configure(controllers::dogrun::config)
            .configure(controllers::dog::config)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
