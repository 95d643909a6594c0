//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 조립을 담당합니다.
//!
//! 각 하위 모듈:
//! - `cars`: 사용자별 차량 조회
//! - `driving_records`: 운전 기록 저장/조회, 실습 코스 목록
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `response`: 성공 응답 봉투
//! - `tmap`: T map 주변 장소 검색
//! - `users`: 사용자 상세 조회

pub mod cars;
pub mod driving_records;
pub mod health;
pub mod response;
pub mod tmap;
pub mod users;

use crate::{
    config::Config,
    error::AppError,
    middleware::{
        error_envelope,
        validation::{as_number, is_positive_id, params_to_value, validate, Location, Rule},
    },
    services::tmap::TmapClient,
};
use axum::{
    extract::OriginalUri,
    http::{Method, Uri},
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::{collections::HashMap, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 풀과 HTTP 클라이언트는 내부적으로 Arc를 쓰므로 clone해도 복제되지 않습니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub tmap: TmapClient,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let tmap = TmapClient::new(&config);
        Self {
            pool,
            config: Arc::new(config),
            tmap,
        }
    }
}

/// 전체 라우터를 조립합니다. 모든 API는 `/api` 아래에 있습니다.
///
/// 레이어는 아래에서 위로 감싸므로, 요청은 Trace → CORS → 에러 봉투 순서로 지나갑니다.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/users/{userId}", get(users::get_user))
        .route("/cars/user/{userId}", get(cars::list_cars))
        .route("/driving-records", post(driving_records::create_record))
        .route(
            "/driving-records/practical-courses",
            get(driving_records::list_practical_courses),
        )
        .route("/driving-records/user/{userId}", get(driving_records::list_records))
        .route("/tmap/search", post(tmap::search))
        .route("/tmap/gas-stations", post(tmap::gas_stations))
        // 위에 등록된 경로 전체에 적용되므로 마지막에 둡니다.
        .method_not_allowed_fallback(method_not_allowed);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            error_envelope,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("Route {} {} not found", method, uri.path()))
}

/// 중첩 라우터 안에서는 `/api`가 잘린 URI가 보이므로 원래 URI를 씁니다.
async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::MethodNotAllowed(format!("Method {} is not allowed on {}", method, uri.path()))
}

/// 경로의 `userId`를 검사해서 정수로 돌려줍니다.
pub(crate) fn user_id_param(params: HashMap<String, String>) -> Result<i64, AppError> {
    let params = params_to_value(params);
    validate(
        Location::Params,
        &params,
        &[Rule::new("userId")
            .required()
            .custom(is_positive_id)
            .message("userId must be a positive number")],
    )?;

    params
        .get("userId")
        .and_then(as_number)
        .map(|id| id as i64)
        .ok_or_else(|| AppError::Internal("userId vanished after validation".to_string()))
}
