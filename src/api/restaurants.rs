use actix_web::{http::header::LOCATION, web, HttpResponse};
use leptos::logging::log;
use serde::Deserialize;

use crate::api::updated_or_conflict;
use crate::auth::CurrentUser;
use crate::db::{Database, DbError};
use crate::error::ApiError;
use crate::models::restaurant::Restaurant;

#[derive(Deserialize)]
pub struct ListQuery {
    pub filter: Option<String>,
}

// GET /api/Restaurants?filter=
pub async fn list(
    db: web::Data<Database>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let restaurants = db.list_restaurants(query.filter.as_deref()).await?;
    log!(
        "[API] Returning {} restaurants for filter {:?}",
        restaurants.len(),
        query.filter
    );
    Ok(HttpResponse::Ok().json(restaurants))
}

// GET /api/Restaurants/{id}
pub async fn get(db: web::Data<Database>, id: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let restaurant = db
        .get_restaurant(id.into_inner())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(restaurant))
}

// POST /api/Restaurants
pub async fn create(
    user: CurrentUser,
    db: web::Data<Database>,
    body: web::Json<Restaurant>,
) -> Result<HttpResponse, ApiError> {
    let restaurant = body.into_inner();
    ApiError::check(restaurant.validation_errors())?;

    let created = db.insert_restaurant(&restaurant, user.id).await?;
    log!("[API] Restaurant {} created by user {}", created.id, user.id);

    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("/api/Restaurants/{}", created.id)))
        .json(created))
}

// PUT /api/Restaurants/{id}
pub async fn update(
    user: CurrentUser,
    db: web::Data<Database>,
    id: web::Path<i64>,
    body: web::Json<Restaurant>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    if !db.restaurant_owned_by(id, user.id).await? {
        log!("[API] User {} may not edit restaurant {}", user.id, id);
        return Err(ApiError::Unauthorized);
    }

    let restaurant = body.into_inner();
    ApiError::check(restaurant.validation_errors())?;
    if restaurant.id != id {
        return Err(ApiError::id_mismatch());
    }

    updated_or_conflict(db.update_restaurant(&restaurant).await, db.restaurant_exists(id)).await
}

// DELETE /api/Restaurants/{id}
pub async fn delete(
    user: CurrentUser,
    db: web::Data<Database>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let restaurant = db.find_restaurant(id).await?.ok_or(ApiError::NotFound)?;

    if restaurant.user_id != user.id {
        log!("[API] User {} may not delete restaurant {}", user.id, id);
        return Err(ApiError::Unauthorized);
    }

    match db.delete_restaurant(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(restaurant)),
        Err(DbError::NoRowsAffected) => Err(ApiError::NotFound),
        Err(e) => Err(e.into()),
    }
}
