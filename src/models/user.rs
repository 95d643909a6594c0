use super::{CarResponse, DrivingRecord};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub name: String,
}

/// 차량과 운전 기록까지 채운 사용자 상세
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub user_id: i64,
    pub name: String,
    pub cars: Vec<CarResponse>,
    pub driving_records: Vec<DrivingRecord>,
}

impl UserDetail {
    pub fn new(user: User, cars: Vec<CarResponse>, driving_records: Vec<DrivingRecord>) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            cars,
            driving_records,
        }
    }
}
