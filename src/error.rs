//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//! - `ErrorReport`: 응답 확장(extension)에 실려 `middleware::error_envelope`가
//!   요청 경로/메서드와 실행 환경에 맞춰 최종 에러 본문을 완성합니다.
//!
//! ## 에러 분류
//! | variant | 상태 코드 | code | 운영상 예상된 에러(operational) |
//! |---------|-----------|------|------------------|
//! | Validation | 422 | VALIDATION_ERROR | 예 |
//! | NotFound | 404 | NOT_FOUND | 예 |
//! | MethodNotAllowed | 405 | METHOD_NOT_ALLOWED | 예 |
//! | Database | 500 | DATABASE_ERROR | 아니오 |
//! | ExternalApi | 502 | EXTERNAL_API_ERROR | 아니오 |
//! | Internal | 500 | INTERNAL_SERVER_ERROR | 아니오 |

use crate::config::Environment;
use crate::middleware::validation::ValidationError;
use crate::services::users::UserNotExist;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 잘못된 입력 (HTTP 422). 수집된 위반 메시지를 모두 담습니다.
    #[error("{message}")]
    Validation {
        message: String,
        location: String,
        errors: Vec<String>,
    },

    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// 경로는 있지만 HTTP 메서드가 맞지 않음 (HTTP 405)
    #[error("{0}")]
    MethodNotAllowed(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx 함수의 에러에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 외부 지도 API 호출 실패 (HTTP 502)
    #[error("External API error: {0}")]
    ExternalApi(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::ExternalApi(_) => "EXTERNAL_API_ERROR",
            AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// 클라이언트 입력으로 생긴, 예상 가능한 에러인지 여부
    pub fn is_operational(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. } | AppError::NotFound(_) | AppError::MethodNotAllowed(_)
        )
    }

    /// 응답 본문의 재료를 만듭니다.
    pub fn report(&self) -> ErrorReport {
        let (public_message, details) = match self {
            AppError::Validation {
                location, errors, ..
            } => (
                self.to_string(),
                Some(json!({ "location": location, "errors": errors })),
            ),
            AppError::NotFound(_) | AppError::MethodNotAllowed(_) => (self.to_string(), None),
            AppError::Database(e) => (
                "A database error occurred".to_string(),
                Some(json!({ "cause": e.to_string() })),
            ),
            AppError::ExternalApi(msg) => (
                "An external service error occurred".to_string(),
                Some(json!({ "cause": msg })),
            ),
            AppError::Internal(_) => ("An unexpected error occurred".to_string(), None),
        };

        ErrorReport {
            status: self.status(),
            code: self.code(),
            message: self.to_string(),
            public_message,
            details,
            operational: self.is_operational(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation {
            message: err.to_string(),
            location: err.location.to_string(),
            errors: err.errors,
        }
    }
}

impl From<UserNotExist> for AppError {
    fn from(err: UserNotExist) -> Self {
        AppError::NotFound(err.to_string())
    }
}

/// 본문이 JSON이 아니거나 Content-Type이 틀린 경우도 검증 에러로 취급합니다.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            message: "Validation failed".to_string(),
            location: "body".to_string(),
            errors: vec![rejection.body_text()],
        }
    }
}

/// 에러 응답을 완성하는 데 필요한 정보
///
/// `AppError::into_response`가 응답 확장에 넣어 두면,
/// `middleware::error_envelope`가 꺼내서 path/method를 채운 본문으로 교체합니다.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub code: &'static str,
    /// 원본 메시지 (개발 환경 또는 operational 에러에서 노출)
    pub message: String,
    /// 운영 환경의 non-operational 에러에 쓰는 일반 메시지
    pub public_message: String,
    pub details: Option<Value>,
    pub operational: bool,
}

/// `{status:"error", code, message, details?, timestamp, path, method}`
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: &'static str,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub timestamp: String,
    pub path: String,
    pub method: String,
}

impl ErrorReport {
    /// 실행 환경에 따라 노출 범위를 정해 최종 에러 본문을 만듭니다.
    ///
    /// - operational 에러: 메시지와 details를 그대로 노출
    /// - 그 외: 개발 환경에서만 원본 메시지와 details 노출
    pub fn envelope(&self, path: &str, method: &str, environment: Environment) -> ErrorEnvelope {
        let expose = self.operational || environment.is_development();
        ErrorEnvelope {
            status: "error",
            code: self.code,
            message: if expose {
                self.message.clone()
            } else {
                self.public_message.clone()
            },
            details: if expose { self.details.clone() } else { None },
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            path: path.to_string(),
            method: method.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, ExternalApi, Internal)는 실제 에러 내용을 로그에 기록합니다.
    /// 본문은 일단 운영 환경 기준으로 만들고, 미들웨어가 요청 정보로 다시 채웁니다.
    fn into_response(self) -> Response {
        if !self.is_operational() {
            tracing::error!(code = self.code(), "{}", self);
        }

        let report = self.report();
        let body = report.envelope("", "", Environment::Production);
        let mut response = (report.status, Json(body)).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::validation::Location;

    #[test]
    fn maps_variants_to_status_and_code() {
        let cases = [
            (
                AppError::from(ValidationError::single(Location::Body, "distance is required")),
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
            ),
            (
                AppError::from(UserNotExist),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                AppError::MethodNotAllowed("GET /api/driving-records".to_string()),
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
            ),
            (
                AppError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
            ),
            (
                AppError::ExternalApi("timeout".to_string()),
                StatusCode::BAD_GATEWAY,
                "EXTERNAL_API_ERROR",
            ),
            (
                AppError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
            ),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status(), status);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn not_found_message_is_not_masked() {
        let report = AppError::from(UserNotExist).report();
        let body = report.envelope("/api/users/9", "GET", Environment::Production);
        assert_eq!(body.message, "User Not Existed");
        assert_eq!(body.path, "/api/users/9");
        assert_eq!(body.method, "GET");
    }

    #[test]
    fn validation_details_carry_every_message() {
        let err = AppError::from(ValidationError {
            location: Location::Params,
            errors: vec!["a".to_string(), "b".to_string()],
        });
        let body = err.report().envelope("/x", "POST", Environment::Production);
        assert_eq!(body.message, "Validation failed");
        assert_eq!(
            body.details,
            Some(json!({ "location": "params", "errors": ["a", "b"] }))
        );
    }

    #[test]
    fn server_errors_are_genericized_in_production() {
        let report = AppError::Internal("secret stack".to_string()).report();

        let prod = report.envelope("/x", "GET", Environment::Production);
        assert_eq!(prod.message, "An unexpected error occurred");
        assert!(prod.details.is_none());

        let dev = report.envelope("/x", "GET", Environment::Development);
        assert_eq!(dev.message, "Internal error: secret stack");
    }

    #[test]
    fn external_api_details_only_in_development() {
        let report = AppError::ExternalApi("status 401".to_string()).report();
        assert!(report
            .envelope("/x", "POST", Environment::Production)
            .details
            .is_none());
        assert_eq!(
            report.envelope("/x", "POST", Environment::Development).details,
            Some(json!({ "cause": "status 401" }))
        );
    }

    #[test]
    fn response_carries_report_extension() {
        let response = AppError::NotFound("User Not Existed".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.code, "NOT_FOUND");
    }
}
