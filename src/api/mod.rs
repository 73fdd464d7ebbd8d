//! JSON API mounted under `/api`.
//!
//! The client uses both `/api/Restaurants` and `/api/restaurants`, so each
//! resource is registered under both spellings.

use std::future::Future;

use actix_web::{web, HttpResponse};
use leptos::logging::warn;
use serde::Serialize;

use crate::db::DbError;
use crate::error::ApiError;

pub mod restaurants;
pub mod reviews;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(path_config())
            .service(
                web::resource(vec!["/Restaurants", "/restaurants"])
                    .route(web::get().to(restaurants::list))
                    .route(web::post().to(restaurants::create)),
            )
            .service(
                web::resource(vec!["/Restaurants/{id}", "/restaurants/{id}"])
                    .route(web::get().to(restaurants::get))
                    .route(web::put().to(restaurants::update))
                    .route(web::delete().to(restaurants::delete)),
            )
            .service(
                web::resource(vec!["/Reviews", "/reviews"])
                    .route(web::post().to(reviews::create)),
            )
            .service(
                web::resource(vec!["/Reviews/{id}", "/reviews/{id}"])
                    .route(web::get().to(reviews::get))
                    .route(web::put().to(reviews::update))
                    .route(web::delete().to(reviews::delete)),
            ),
    );
}

/// Unparsable bodies are reported like any other validation failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| ApiError::field("$", err.to_string()).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|_err, _req| ApiError::NotFound.into())
}

/// Response for an update. When the write matched no row, the record was
/// deleted between the ownership check and the write (404), or something else
/// went wrong while it still exists (500). `still_exists` only runs in that case.
pub(crate) async fn updated_or_conflict<T, F>(
    result: Result<T, DbError>,
    still_exists: F,
) -> Result<HttpResponse, ApiError>
where
    T: Serialize,
    F: Future<Output = Result<bool, DbError>>,
{
    match result {
        Ok(updated) => Ok(HttpResponse::Ok().json(updated)),
        Err(DbError::NoRowsAffected) => {
            if still_exists.await? {
                Err(ApiError::Internal(
                    "update affected no rows but the record still exists".to_string(),
                ))
            } else {
                warn!("[API] Record deleted before the update was written");
                Err(ApiError::NotFound)
            }
        }
        Err(e) => Err(e.into()),
    }
}
