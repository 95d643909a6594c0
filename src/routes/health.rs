//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/health` → `{ "status": "ok" }`
//!
//! 로드밸런서나 컨테이너 헬스체크가 호출합니다. DB에는 접근하지 않습니다.

use axum::Json;
use serde_json::{json, Value};

/// 봉투 없이 고정된 본문만 돌려주며 실패하지 않습니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}
