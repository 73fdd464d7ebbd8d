//! Browser-side calls to the JSON API.
//!
//! Every call attaches the bearer token kept in local storage under `auth`, when
//! there is one. Failures carry the server's error body so pages can show its
//! messages verbatim.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::api_error::{ApiErrorBody, ErrorDetails};
use crate::models::restaurant::Restaurant;
use crate::models::review::Review;

const AUTH_STORAGE_KEY: &str = "auth";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("{0}")]
    Network(String),

    #[error("{}", .0.message())]
    Api(ApiErrorBody),
}

impl From<gloo_net::Error> for ClientError {
    fn from(err: gloo_net::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

/// Accepts a stored login response or a bare token.
#[derive(Deserialize)]
struct StoredAuth {
    token: String,
}

pub fn restaurants_url(filter: &str) -> String {
    let filter = filter.trim();
    if filter.is_empty() {
        "/api/Restaurants".to_string()
    } else {
        format!("/api/Restaurants?filter={}", urlencoding::encode(filter))
    }
}

pub fn bearer_from_stored(raw: &str) -> String {
    let token = serde_json::from_str::<StoredAuth>(raw)
        .map(|auth| auth.token)
        .unwrap_or_else(|_| raw.trim().to_string());
    format!("Bearer {token}")
}

fn auth_header() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let raw = storage.get_item(AUTH_STORAGE_KEY).ok()??;
    Some(bearer_from_stored(&raw))
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match auth_header() {
        Some(value) => builder.header("Authorization", &value),
        None => builder,
    }
}

async fn error_from(response: Response) -> ClientError {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => ClientError::Api(body),
        Err(_) => ClientError::Api(ApiErrorBody {
            status,
            title: Some(response.status_text()),
            errors: ErrorDetails::default(),
        }),
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if response.ok() {
        Ok(response.json::<T>().await?)
    } else {
        Err(error_from(response).await)
    }
}

async fn read_empty(response: Response) -> Result<(), ClientError> {
    if response.ok() {
        Ok(())
    } else {
        Err(error_from(response).await)
    }
}

async fn send_json<B: Serialize, T: DeserializeOwned>(
    builder: RequestBuilder,
    body: &B,
) -> Result<T, ClientError> {
    let response = authorized(builder).json(body)?.send().await?;
    read_json(response).await
}

pub async fn load_restaurants(filter: &str) -> Result<Vec<Restaurant>, ClientError> {
    let response = Request::get(&restaurants_url(filter)).send().await?;
    read_json(response).await
}

pub async fn load_restaurant(id: i64) -> Result<Restaurant, ClientError> {
    let response = Request::get(&format!("/api/Restaurants/{id}"))
        .send()
        .await?;
    read_json(response).await
}

pub async fn create_restaurant(restaurant: &Restaurant) -> Result<Restaurant, ClientError> {
    send_json(Request::post("/api/Restaurants"), restaurant).await
}

pub async fn update_restaurant(restaurant: &Restaurant) -> Result<Restaurant, ClientError> {
    let url = format!("/api/Restaurants/{}", restaurant.id);
    send_json(Request::put(&url), restaurant).await
}

pub async fn delete_restaurant(id: i64) -> Result<(), ClientError> {
    let response = authorized(Request::delete(&format!("/api/Restaurants/{id}")))
        .send()
        .await?;
    read_empty(response).await
}

pub async fn create_review(review: &Review) -> Result<Review, ClientError> {
    send_json(Request::post("/api/Reviews"), review).await
}

pub async fn delete_review(id: i64) -> Result<(), ClientError> {
    let response = authorized(Request::delete(&format!("/api/Reviews/{id}")))
        .send()
        .await?;
    read_empty(response).await
}
