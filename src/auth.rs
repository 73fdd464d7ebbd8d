//! Bearer-token authentication.
//!
//! Tokens are compact HS256 JWTs. The caller's numeric user id travels in the
//! `Id` claim, either as a string (`"Id": "7"`) or as a number.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use leptos::logging::warn;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::error::ApiError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    #[error("token is not three dot-separated segments")]
    Malformed,
    #[error("token segment is not valid base64url: {0}")]
    Encoding(String),
    #[error("token segment is not valid JSON: {0}")]
    Json(String),
    #[error("unsupported algorithm {0}")]
    Algorithm(String),
    #[error("signature mismatch")]
    Signature,
    #[error("token expired")]
    Expired,
    #[error("Id claim is not an integer")]
    InvalidId,
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default)]
    typ: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClaimId {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
struct Claims {
    #[serde(rename = "Id")]
    id: ClaimId,
    #[serde(default)]
    exp: Option<i64>,
}

#[derive(Serialize)]
struct IssuedClaims {
    #[serde(rename = "Id")]
    id: String,
    iat: i64,
    exp: i64,
}

/// Signing key shared by token issuance and verification.
#[derive(Clone)]
pub struct TokenKeys {
    secret: Vec<u8>,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size")
    }

    pub fn issue(&self, user_id: i64, ttl_secs: i64) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: Some("JWT".to_string()),
        };
        let claims = IssuedClaims {
            id: user_id.to_string(),
            iat: now,
            exp: now + ttl_secs,
        };

        let header = serde_json::to_vec(&header).map_err(|e| AuthError::Json(e.to_string()))?;
        let claims = serde_json::to_vec(&claims).map_err(|e| AuthError::Json(e.to_string()))?;
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(claims)
        );

        let mut mac = self.mac();
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }

    /// Returns the user id carried by a valid token.
    pub fn verify(&self, token: &str) -> Result<i64, AuthError> {
        let mut segments = token.split('.');
        let (header, payload, signature) =
            match (segments.next(), segments.next(), segments.next(), segments.next()) {
                (Some(h), Some(p), Some(s), None) => (h, p, s),
                _ => return Err(AuthError::Malformed),
            };

        let header: Header = serde_json::from_slice(&decode(header)?)
            .map_err(|e| AuthError::Json(e.to_string()))?;
        if header.alg != ALGORITHM {
            return Err(AuthError::Algorithm(header.alg));
        }

        let mut mac = self.mac();
        mac.update(token[..token.len() - signature.len() - 1].as_bytes());
        mac.verify_slice(&decode(signature)?)
            .map_err(|_| AuthError::Signature)?;

        let claims: Claims = serde_json::from_slice(&decode(payload)?)
            .map_err(|e| AuthError::Json(e.to_string()))?;
        if let Some(exp) = claims.exp {
            if exp <= Utc::now().timestamp() {
                return Err(AuthError::Expired);
            }
        }

        match claims.id {
            ClaimId::Number(id) => Ok(id),
            ClaimId::Text(text) => text.trim().parse().map_err(|_| AuthError::InvalidId),
        }
    }
}

fn decode(segment: &str) -> Result<Vec<u8>, AuthError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| AuthError::Encoding(e.to_string()))
}

/// The authenticated caller. Extracting it rejects the request with 401 when
/// the bearer token is missing or invalid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentUser {
    pub id: i64,
}

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<CurrentUser, ApiError> {
    let keys = req
        .app_data::<web::Data<TokenKeys>>()
        .ok_or_else(|| ApiError::Internal("token keys are not registered".to_string()))?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .ok_or(ApiError::Unauthorized)?
        .trim();

    keys.verify(token)
        .map(|id| CurrentUser { id })
        .map_err(|e| {
            warn!("[AUTH] Rejected bearer token: {}", e);
            ApiError::Unauthorized
        })
}
