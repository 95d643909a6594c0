//! # 성공 응답 봉투
//!
//! 모든 성공 응답은 `{ "status": "success", "data": ..., "timestamp": ... }` 형태입니다.
//! 에러 응답은 `error::ErrorEnvelope`를 참고하세요.

use axum::{http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};

/// 200 OK
pub fn success<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": data,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// 201 Created
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, success(data))
}
