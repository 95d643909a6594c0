//! # 사용자/차량 조회 서비스
//!
//! 사용자 상세는 존재 여부를 먼저 확인한 뒤 차량과 운전 기록을 붙입니다.
//! 존재 확인 이후의 조회 실패는 그대로 전파됩니다.

use crate::{db, error::AppError, models::*};
use sqlx::SqlitePool;
use thiserror::Error;

/// 요청한 사용자가 없을 때 (→ 404)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("User Not Existed")]
pub struct UserNotExist;

pub async fn get_user_by_user_id(pool: &SqlitePool, user_id: i64) -> Result<UserDetail, AppError> {
    let user = db::users::find_by_id(pool, user_id)
        .await?
        .ok_or(UserNotExist)?;

    let records = db::list_records_by_user(pool, user_id).await?;
    let cars = get_cars_by_user_id(pool, user_id).await?;

    Ok(UserDetail::new(user, cars, records))
}

/// 사용자의 차량 목록. 사용자가 없거나 차량이 없으면 빈 목록입니다.
pub async fn get_cars_by_user_id(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<CarResponse>, AppError> {
    let cars = db::list_cars_by_user(pool, user_id).await?;
    Ok(cars.into_iter().map(CarResponse::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connect_in_memory, fixtures};

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let pool = connect_in_memory().await;
        let err = get_user_by_user_id(&pool, 999_999).await.unwrap_err();
        match err {
            AppError::NotFound(message) => assert_eq!(message, "User Not Existed"),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn user_is_enriched_with_cars_and_records() {
        let pool = connect_in_memory().await;
        let user_id = fixtures::insert_user(&pool, "kim").await;
        fixtures::insert_car(&pool, user_id, "K5", 9_800).await;
        fixtures::insert_car(&pool, user_id, "Ray", 1_000).await;

        let detail = get_user_by_user_id(&pool, user_id).await.unwrap();
        assert_eq!(detail.user_id, user_id);
        assert_eq!(detail.name, "kim");
        assert!(detail.driving_records.is_empty());
        assert_eq!(detail.cars.len(), 2);
        assert!(detail.cars[0].swap.oil_swap);
        assert!(!detail.cars[1].swap.oil_swap);
    }

    #[tokio::test]
    async fn cars_of_unknown_user_are_empty() {
        let pool = connect_in_memory().await;
        assert!(get_cars_by_user_id(&pool, 42).await.unwrap().is_empty());
    }
}
