use actix_web::{http::header::LOCATION, web, HttpResponse};
use leptos::logging::log;

use crate::api::updated_or_conflict;
use crate::auth::CurrentUser;
use crate::db::{Database, DbError};
use crate::error::ApiError;
use crate::models::review::Review;

// GET /api/Reviews/{id}
pub async fn get(db: web::Data<Database>, id: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let review = db.get_review(id.into_inner()).await?.ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(review))
}

// POST /api/Reviews
pub async fn create(
    user: CurrentUser,
    db: web::Data<Database>,
    body: web::Json<Review>,
) -> Result<HttpResponse, ApiError> {
    let review = body.into_inner();
    ApiError::check(review.validation_errors())?;

    let created = db.insert_review(&review, user.id).await?;
    log!(
        "[API] Review {} for restaurant {} created by user {}",
        created.id,
        created.restaurant_id,
        user.id
    );

    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("/api/Reviews/{}", created.id)))
        .json(created))
}

// PUT /api/Reviews/{id}
pub async fn update(
    user: CurrentUser,
    db: web::Data<Database>,
    id: web::Path<i64>,
    body: web::Json<Review>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let owned = db
        .get_review(id)
        .await?
        .is_some_and(|existing| existing.user_id == user.id);
    if !owned {
        log!("[API] User {} may not edit review {}", user.id, id);
        return Err(ApiError::Unauthorized);
    }

    let review = body.into_inner();
    ApiError::check(review.validation_errors())?;
    if review.id != id {
        return Err(ApiError::id_mismatch());
    }

    updated_or_conflict(db.update_review(&review).await, db.review_exists(id)).await
}

// DELETE /api/Reviews/{id}
pub async fn delete(
    user: CurrentUser,
    db: web::Data<Database>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let review = db.get_review(id).await?.ok_or(ApiError::NotFound)?;

    if review.user_id != user.id {
        log!("[API] User {} may not delete review {}", user.id, id);
        return Err(ApiError::Unauthorized);
    }

    match db.delete_review(id).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(DbError::NoRowsAffected) => Err(ApiError::NotFound),
        Err(e) => Err(e.into()),
    }
}
