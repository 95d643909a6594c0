//! # Chobo 웹 서버 진입점
//!
//! 이 파일은 운전 기록 백엔드의 **시작점(entry point)**입니다.
//! Rust 프로그램은 항상 `main()` 함수에서 실행이 시작됩니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 읽기
//! 4. SQLite 연결 풀 생성 및 마이그레이션 실행
//! 5. 애플리케이션 상태(AppState)와 API 라우터 조립
//! 6. HTTP 서버 시작

// ── 모듈 선언 ──
// `mod config;`는 같은 디렉토리의 `config.rs` 또는 `config/mod.rs`를 모듈로 가져옵니다.
// 파일 시스템 구조가 곧 모듈 구조입니다.
mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod services;

// ── 필요한 항목 가져오기 ──
use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result
use config::Config; // 환경변수 기반 설정
use routes::AppState; // 모든 핸들러가 공유하는 상태 (DB 풀, 설정, T map 클라이언트)
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 초기화 유틸리티

// #[tokio::main]: main을 Tokio 비동기 런타임 안에서 실행하게 해 주는 어트리뷰트 매크로.
// 기본 main은 동기 함수라서 .await를 쓰려면 런타임이 필요합니다.
#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일의 값을 프로세스 환경변수로 올립니다.
    // .ok(): Result를 Option으로 바꿔 버리므로 .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // registry()로 수집기를 만들고, .with()로 필터와 출력 레이어를 쌓습니다.
    tracing_subscriber::registry()
        .with(
            // EnvFilter: RUST_LOG 환경변수로 로그 레벨을 제어합니다.
            // 없으면 chobo, tower_http, axum 모듈을 debug 레벨로 출력합니다.
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chobo=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer()) // 로그를 터미널에 출력하는 포맷터 레이어
        .init(); // 전역 로거로 등록

    // ── 3단계: 설정 로딩 ──
    // `?`: DATABASE_URL이 없으면 여기서 에러와 함께 종료합니다.
    //      VarError는 anyhow::Error로 자동 변환됩니다.
    let config = Config::from_env()?;
    // `environment = ?config.environment`: 구조화된 필드로 기록. `?`는 Debug 포맷을 뜻합니다.
    tracing::info!(
        environment = ?config.environment,
        "Starting Chobo server on {}:{}",
        config.host,
        config.port
    );
    if config.tmap_api_key.is_empty() {
        tracing::warn!("TMAP_API_KEY is not set, map searches will be rejected upstream");
    }

    // ── 4단계: 연결 풀 생성 + 마이그레이션 ──
    // db::connect가 DB 파일이 없으면 만들고, ./migrations의 SQL을 아직 안 돌린 것만 실행합니다.
    let pool = db::connect(&config.database_url, config.db_max_connections).await?;

    // ── 5단계: 상태와 라우터 조립 ──
    // 주소 문자열은 config가 AppState로 이동(move)하기 전에 만들어 둡니다.
    // 이동 후에는 config를 더 이상 쓸 수 없습니다.
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(pool, config);
    // 라우트 표, CORS, 요청 로깅(TraceLayer), 에러 봉투 레이어가 모두 여기서 붙습니다.
    let app = routes::build_router(state);

    // ── 6단계: 서버 시작 ──
    // TcpListener::bind: 지정한 주소에서 연결 수신을 시작합니다.
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // axum::serve(): 요청을 받아 라우터로 넘깁니다. 종료(Ctrl+C)될 때까지 반환하지 않습니다.
    axum::serve(listener, app).await?;

    // Ok(()): 성공. ()는 "빈 값"(unit 타입)입니다.
    Ok(())
}
