//! # 차량 API 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/cars/user/{userId}` → 사용자의 차량 목록 (소모품 교체 필요 여부 포함)

use super::{response, user_id_param, AppState};
use crate::{error::AppError, services};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

pub async fn list_cars(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let user_id = user_id_param(params)?;
    let cars = services::users::get_cars_by_user_id(&state.pool, user_id).await?;
    Ok(response::success(cars))
}
