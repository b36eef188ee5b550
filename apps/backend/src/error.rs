use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// RFC 7807 problem body emitted for every error response.
#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    fn code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest { code, .. } => *code,
            AppError::Unauthorized => ErrorCode::Unauthorized,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::Unauthorized => "Login required".to_string(),
            AppError::Db { detail } => detail.clone(),
            AppError::Internal { detail, .. } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Db { .. } | AppError::Internal { .. } | AppError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }

    pub fn data_corruption(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::DataCorruption,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(format!("db error: {e}"))
    }
}

/// Spec mapping: validation failures and references to nonexistent
/// worlds/games/contracts are client errors; invariant violations in
/// stored data surface as server failures, never as user input errors.
impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => {
                AppError::bad_request(ErrorCode::ValidationError, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::World => ErrorCode::WorldNotFound,
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::Contract => ErrorCode::ContractNotFound,
                    NotFoundKind::Player => ErrorCode::UnknownPlayer,
                };
                AppError::bad_request(code, detail)
            }
            DomainError::Infra(InfraErrorKind::DataCorruption, detail) => {
                AppError::data_corruption(detail)
            }
            DomainError::Infra(_, detail) => AppError::db(detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().to_string();
        let detail = self.detail();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://crail.app/errors/{code}"),
            title: Self::humanize_code(&code),
            status: status.as_u16(),
            detail,
            code,
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::AppError;
    use crate::errors::domain::{DomainError, NotFoundKind};
    use crate::errors::ErrorCode;

    #[test]
    fn nonexistent_references_map_to_bad_request() {
        let err: AppError = DomainError::not_found(NotFoundKind::World, "world 9").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), ErrorCode::WorldNotFound);
    }

    #[test]
    fn data_corruption_maps_to_server_error() {
        let err: AppError = DomainError::data_corruption("two players named x").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), ErrorCode::DataCorruption);
    }

    #[test]
    fn humanize_code_title_cases() {
        assert_eq!(AppError::humanize_code("GAME_NOT_FOUND"), "GAME NOT FOUND");
    }
}
