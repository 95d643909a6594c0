//! # 데이터베이스 접근 계층 (Persistence Gateway)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 서비스 계층(services/)에서 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `cars`: 사용자별 차량 조회
//! - `courses`: 실습 코스 조회
//! - `driving_records`: 운전 기록 저장/조회, 코스 성격 태그와 항목 평가 조인
//! - `users`: 사용자 조회

pub mod cars;
pub mod courses;
pub mod driving_records;
pub mod users;

pub use cars::*;
pub use courses::*;
pub use driving_records::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// 연결 풀을 만들고 `./migrations`의 마이그레이션을 적용합니다.
///
/// 외래키 제약은 연결마다 켜야 하므로 `foreign_keys(true)`로 지정합니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// 테스트용 인메모리 DB. 연결마다 별도 DB가 생기므로 연결은 하나만 둡니다.
#[cfg(test)]
pub async fn connect_in_memory() -> SqlitePool {
    connect("sqlite::memory:", 1)
        .await
        .expect("in-memory database")
}
