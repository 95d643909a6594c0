use serde::Serialize;

/// 실습 코스: DB의 `practical_course` 테이블 한 행
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PracticalCourse {
    pub course_id: i64,
    pub name: String,
    pub description: Option<String>,
}
