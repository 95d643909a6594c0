//! # 에러 응답 봉투(envelope) 미들웨어
//!
//! 핸들러가 돌려준 `AppError` 응답에서 `ErrorReport`를 꺼내
//! 요청 경로/메서드와 실행 환경(개발/운영)에 맞는 에러 본문으로 교체합니다.
//!
//! `AppError::into_response`는 요청 정보를 알 수 없기 때문에
//! 이 작업을 라우터 바깥쪽 레이어에서 처리합니다.

use crate::{error::ErrorReport, routes::AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

pub async fn error_envelope(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let mut response = next.run(request).await;

    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    if report.operational {
        tracing::debug!(%method, %path, code = report.code, "request rejected");
    }

    let body = report.envelope(&path, &method, state.config.environment);
    (report.status, Json(body)).into_response()
}
