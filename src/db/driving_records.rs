//! # 운전 기록 데이터베이스 쿼리 모듈
//!
//! ## 테이블 구조
//! - `driving_records`: 운전 기록 본문
//! - `course_character`: 기록별 코스 성격 태그 (record_id, character)
//! - `drive_assessment`: 기록별 항목 평가
//!
//! 태그와 평가는 사용자 ID로 `driving_records`를 JOIN해서 한 번에 가져온 뒤
//! 기록 ID별로 나눠 붙입니다.

use crate::error::AppError;
use crate::models::{DriveAssessment, DrivingRecord, NewDrivingRecord};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// 새 운전 기록을 저장하고 생성된 record_id를 반환합니다.
///
/// INSERT 한 번으로 끝나므로 실패하면 아무것도 남지 않습니다.
pub async fn insert_driving_record(
    pool: &SqlitePool,
    record: &NewDrivingRecord,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO driving_records (
            user_id, record_title,
            cruise_control, coasting, overspeed, high_torque, idling, anticipation,
            driving_time, engine_on_time, date, distance,
            start_point, end_point, start_time, end_time,
            total_point, summary
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.user_id)
    .bind(&record.record_title)
    .bind(record.scores.cruise_control)
    .bind(record.scores.coasting)
    .bind(record.scores.overspeed)
    .bind(record.scores.high_torque)
    .bind(record.scores.idling)
    .bind(record.scores.anticipation)
    .bind(record.driving_time)
    .bind(record.engine_on_time)
    .bind(record.date)
    .bind(record.distance)
    .bind(&record.start_point)
    .bind(&record.end_point)
    .bind(record.start_time)
    .bind(record.end_time)
    .bind(record.total_point)
    .bind(&record.summary)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// 사용자의 가장 최근 기록의 totalPoint
///
/// "가장 최근"은 생성 시각(date)이 가장 늦은 기록이고, 같으면 record_id가 큰 쪽입니다.
pub async fn find_latest_total_point(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Option<f64>, AppError> {
    let row = sqlx::query_as::<_, (f64,)>(
        r#"
        SELECT total_point
        FROM driving_records
        WHERE user_id = ?
        ORDER BY date DESC, record_id DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(total_point,)| total_point))
}

/// 사용자의 모든 운전 기록을 태그와 평가까지 채워서 조회합니다.
///
/// 정렬 순서는 보장하지 않습니다. 최근 기록이 필요하면 호출하는 쪽에서 정렬합니다.
pub async fn list_records_by_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<DrivingRecord>, AppError> {
    let mut records = sqlx::query_as::<_, DrivingRecord>(
        r#"
        SELECT record_id, user_id, record_title,
               cruise_control, coasting, overspeed, high_torque, idling, anticipation,
               driving_time, engine_on_time, date, distance,
               start_point, end_point, start_time, end_time,
               total_point, summary
        FROM driving_records
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    if records.is_empty() {
        return Ok(records);
    }

    let mut characters = list_characters_by_user(pool, user_id).await?;
    let mut assessments = list_assessments_by_user(pool, user_id).await?;

    for record in &mut records {
        record.character = characters.remove(&record.record_id).unwrap_or_default();
        record.assessments = assessments.remove(&record.record_id).unwrap_or_default();
    }

    Ok(records)
}

/// record_id → 코스 성격 태그 목록
async fn list_characters_by_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<HashMap<i64, Vec<String>>, AppError> {
    let rows = sqlx::query_as::<_, (i64, String)>(
        r#"
        SELECT cc.record_id, cc.character
        FROM course_character cc
        JOIN driving_records dr ON dr.record_id = cc.record_id
        WHERE dr.user_id = ?
        ORDER BY cc.record_id, cc.character
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
    for (record_id, character) in rows {
        grouped.entry(record_id).or_default().push(character);
    }
    Ok(grouped)
}

/// record_id → 항목 평가 목록
async fn list_assessments_by_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<HashMap<i64, Vec<DriveAssessment>>, AppError> {
    let rows = sqlx::query_as::<_, DriveAssessment>(
        r#"
        SELECT da.assessment_id, da.record_id, da.category, da.score, da.comment
        FROM drive_assessment da
        JOIN driving_records dr ON dr.record_id = da.record_id
        WHERE dr.user_id = ?
        ORDER BY da.assessment_id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<i64, Vec<DriveAssessment>> = HashMap::new();
    for assessment in rows {
        grouped.entry(assessment.record_id).or_default().push(assessment);
    }
    Ok(grouped)
}
