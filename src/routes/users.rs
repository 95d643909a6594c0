//! # 사용자 API 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/users/{userId}` → 사용자 상세 (차량, 운전 기록 포함)

use super::{response, user_id_param, AppState};
use crate::{error::AppError, services};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// 없는 사용자면 404 `User Not Existed`
pub async fn get_user(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let user_id = user_id_param(params)?;
    let user = services::users::get_user_by_user_id(&state.pool, user_id).await?;
    Ok(response::success(user))
}
