use crate::error::AppError;
use crate::models::PracticalCourse;
use sqlx::SqlitePool;

/// 실습 코스 전체를 조회합니다. 필터링/페이지네이션 없음.
pub async fn list_practical_courses(pool: &SqlitePool) -> Result<Vec<PracticalCourse>, AppError> {
    let courses = sqlx::query_as::<_, PracticalCourse>(
        "SELECT course_id, name, description FROM practical_course",
    )
    .fetch_all(pool)
    .await?;

    Ok(courses)
}
