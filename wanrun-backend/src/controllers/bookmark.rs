//! Dogrun bookmark endpoints

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use super::{caller, run_blocking};
use crate::errors::WrError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BookmarkAddRequest {
    #[serde(rename = "dogrunIDs")]
    dogrun_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct BookmarkAddResponse {
    #[serde(rename = "bookmarkIDs")]
    bookmark_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct BookmarkDeleteRequest {
    #[serde(rename = "dogrunIDs")]
    dogrun_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct BookmarkEntry {
    #[serde(rename = "bookmarkID")]
    bookmark_id: i64,
    #[serde(rename = "dogrunID")]
    dogrun_id: i64,
    #[serde(rename = "createdAt")]
    created_at: String,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/bookmark")
            .route(web::get().to(list_bookmarks))
            .route(web::post().to(add_bookmark))
            .route(web::delete().to(delete_bookmark)),
    );
}

async fn add_bookmark(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<BookmarkAddRequest>,
) -> Result<HttpResponse, WrError> {
    let claims = caller(&state, &req)?;
    let dogrun_ids = body.into_inner().dogrun_ids;

    let manager = state.bookmarks.clone();
    let bookmark_ids = run_blocking(move || manager.add_bookmarks(&claims, &dogrun_ids)).await?;

    Ok(HttpResponse::Ok().json(BookmarkAddResponse { bookmark_ids }))
}

async fn delete_bookmark(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<BookmarkDeleteRequest>,
) -> Result<HttpResponse, WrError> {
    let claims = caller(&state, &req)?;
    let dogrun_ids = body.into_inner().dogrun_ids;

    let manager = state.bookmarks.clone();
    run_blocking(move || manager.delete_bookmarks(&claims, &dogrun_ids)).await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn list_bookmarks(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, WrError> {
    let claims = caller(&state, &req)?;

    let manager = state.bookmarks.clone();
    let bookmarks = run_blocking(move || manager.list_bookmarks(&claims)).await?;

    let entries: Vec<BookmarkEntry> = bookmarks
        .into_iter()
        .map(|b| BookmarkEntry {
            bookmark_id: b.id,
            dogrun_id: b.dogrun_id,
            created_at: b.created_at.to_rfc3339(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::{json_config, test_support::Fixture};
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn test_add_then_delete() {
        let fx = Fixture::new();
        let (owner, auth) = fx.owner("hana");
        let run_a = fx.db.insert_dogrun("A", None, None, None, None).unwrap();
        let run_b = fx.db.insert_dogrun("B", None, None, None, None).unwrap();

        let app = test::init_service(
            App::new().app_data(fx.state.clone()).app_data(json_config(1024)).configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/bookmark")
            .insert_header(("Authorization", auth.as_str()))
            .set_json(json!({ "dogrunIDs": [run_a, run_b] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["bookmarkIDs"].as_array().unwrap().len(), 2);

        let req = test::TestRequest::delete()
            .uri("/bookmark")
            .insert_header(("Authorization", auth.as_str()))
            .set_json(json!({ "dogrunIDs": [run_a, 31337] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let remaining = fx.db.get_bookmarks_by_owner(owner).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].dogrun_id, run_b);

        let req = test::TestRequest::get()
            .uri("/bookmark")
            .insert_header(("Authorization", auth.as_str()))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["dogrunID"], run_b);
    }

    #[actix_web::test]
    async fn test_delete_empty_and_oversized_lists() {
        let fx = Fixture::new();
        let (owner, auth) = fx.owner("hana");
        let run_a = fx.db.insert_dogrun("A", None, None, None, None).unwrap();
        fx.db.create_bookmark(owner, run_a).unwrap();

        let app = test::init_service(
            App::new()
                .app_data(fx.state.clone())
                .app_data(json_config(1024 * 1024))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/bookmark")
            .insert_header(("Authorization", auth.as_str()))
            .set_json(json!({ "dogrunIDs": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(fx.db.get_bookmark(owner, run_a).unwrap().is_some());

        let mut ids: Vec<i64> = (1_000..41_000).collect();
        ids.push(run_a);
        let req = test::TestRequest::delete()
            .uri("/bookmark")
            .insert_header(("Authorization", auth.as_str()))
            .set_json(json!({ "dogrunIDs": ids }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(fx.db.get_bookmarks_by_owner(owner).unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_duplicate_is_bad_request() {
        let fx = Fixture::new();
        let (owner, auth) = fx.owner("hana");
        let run_a = fx.db.insert_dogrun("A", None, None, None, None).unwrap();
        let run_b = fx.db.insert_dogrun("B", None, None, None, None).unwrap();
        fx.db.create_bookmark(owner, run_b).unwrap();

        let app = test::init_service(
            App::new().app_data(fx.state.clone()).app_data(json_config(1024)).configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/bookmark")
            .insert_header(("Authorization", auth.as_str()))
            .set_json(json!({ "dogrunIDs": [run_a, run_b] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "6-1");

        // run_a was bookmarked before the duplicate stopped the batch
        assert!(fx.db.get_bookmark(owner, run_a).unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_unknown_dogrun_and_missing_auth() {
        let fx = Fixture::new();
        let (owner, auth) = fx.owner("hana");

        let app = test::init_service(
            App::new().app_data(fx.state.clone()).app_data(json_config(1024)).configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/bookmark")
            .insert_header(("Authorization", auth.as_str()))
            .set_json(json!({ "dogrunIDs": [404] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "4-1");
        assert!(fx.db.get_bookmarks_by_owner(owner).unwrap().is_empty());

        let req = test::TestRequest::post()
            .uri("/bookmark")
            .set_json(json!({ "dogrunIDs": [1] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_malformed_body() {
        let fx = Fixture::new();
        let (_, auth) = fx.owner("hana");

        let app = test::init_service(
            App::new().app_data(fx.state.clone()).app_data(json_config(1024)).configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/bookmark")
            .insert_header(("Authorization", auth.as_str()))
            .set_json(json!({ "dogrunIDs": "five" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "0-1");
    }
}
