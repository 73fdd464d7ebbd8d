use std::collections::BTreeMap;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use leptos::logging::error;
use thiserror::Error;

use crate::db::DbError;
use crate::models::api_error::{ApiErrorBody, ErrorDetails};

const VALIDATION_TITLE: &str = "One or more validation errors occurred.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(BTreeMap<String, Vec<String>>),

    #[error("Not found")]
    NotFound,

    #[error("Not Authorized")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.to_string(), vec![message.into()]);
        ApiError::Validation(fields)
    }

    /// Collects `(field, message)` pairs; `Ok` when there are none.
    pub fn check(errors: Vec<(&'static str, String)>) -> Result<(), ApiError> {
        if errors.is_empty() {
            return Ok(());
        }
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (field, message) in errors {
            fields.entry(field.to_string()).or_default().push(message);
        }
        Err(ApiError::Validation(fields))
    }

    pub fn id_mismatch() -> Self {
        ApiError::field("id", "The id in the URL does not match the id in the body.")
    }

    pub fn body(&self) -> ApiErrorBody {
        let status = self.status_code().as_u16();
        match self {
            ApiError::Validation(fields) => ApiErrorBody {
                status,
                title: Some(VALIDATION_TITLE.to_string()),
                errors: ErrorDetails::Fields(fields.clone()),
            },
            ApiError::NotFound => ApiErrorBody {
                status,
                title: Some("Not Found".to_string()),
                errors: ErrorDetails::default(),
            },
            ApiError::Unauthorized => ApiErrorBody {
                status,
                title: None,
                errors: ErrorDetails::Messages(vec!["Not Authorized".to_string()]),
            },
            ApiError::Internal(_) => ApiErrorBody {
                status,
                title: Some("Internal Server Error".to_string()),
                errors: ErrorDetails::default(),
            },
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::MissingRestaurant(_) => {
                ApiError::field("RestaurantId", "The restaurant does not exist.")
            }
            DbError::UnknownUser(_) => ApiError::Unauthorized,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(detail) = self {
            error!("[API] {}", detail);
        }
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_groups_messages_by_field() {
        let err = ApiError::check(vec![
            ("Name", "You must provide a name.".into()),
            ("Name", "Too short.".into()),
            ("Address", "You must provide an address.".into()),
        ])
        .unwrap_err();

        match err {
            ApiError::Validation(fields) => {
                assert_eq!(fields["Name"].len(), 2);
                assert_eq!(fields["Address"].len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(ApiError::check(Vec::new()).is_ok());
    }

    #[test]
    fn unauthorized_body_lists_message() {
        let body = ApiError::Unauthorized.body();
        assert_eq!(body.status, 401);
        assert_eq!(body.errors, ErrorDetails::Messages(vec!["Not Authorized".into()]));
    }

    #[test]
    fn db_errors_map_to_status() {
        assert_eq!(
            ApiError::from(DbError::MissingRestaurant(9)).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DbError::UnknownUser(9)).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(DbError::NoRowsAffected).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
