//! # 운전 기록 서비스
//!
//! - `insert_driving_record`: 요청 검증 → 직전 기록 조회 → 채점 → 저장
//! - `get_records_by_user_id`: 사용자 운전 기록 목록 (태그/평가 포함)
//! - `get_practical_courses`: 실습 코스 전체 목록
//!
//! ## 기록 저장 흐름
//! ```text
//! CreateDrivingRecordRequest
//!   → DrivingSession::try_from()   필수 필드 누락/0/빈 문자열이면 ValidationError (DB 접근 없음)
//!   → 사용자 존재 확인                없으면 UserNotExist
//!   → 직전 기록의 totalPoint 조회
//!   → scoring::score()              별점, 등급, 비교 설명
//!   → INSERT 1회
//! ```

use crate::{
    db,
    error::AppError,
    middleware::validation::{Location, ValidationError},
    models::*,
    services::{scoring, users::UserNotExist},
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

/// 검증을 통과한 운전 세션
#[derive(Debug, Clone, PartialEq)]
pub struct DrivingSession {
    pub user_id: i64,
    pub scores: SubScores,
    pub driving_time: f64,
    pub engine_on_time: f64,
    pub distance: f64,
    pub start_point: String,
    pub end_point: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub record_title: Option<String>,
}

/// `POST /api/driving-records` 응답 데이터
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub record_id: i64,
    pub total_point: f64,
    #[serde(flatten)]
    pub card: scoring::ScoreCard,
}

/// 필드별 검사 결과를 모으는 도우미. 첫 위반에서 멈추지 않습니다.
struct FieldCheck {
    errors: Vec<String>,
}

impl FieldCheck {
    /// 0이 아닌 숫자여야 합니다. 없거나 0이면 required 위반.
    fn number(&mut self, field: &str, value: Option<&Numeric>) -> f64 {
        match value.map(Numeric::as_f64) {
            None => {
                self.errors.push(format!("{} is required", field));
                0.0
            }
            Some(None) => {
                self.errors.push(format!("{} must be a number", field));
                0.0
            }
            Some(Some(n)) if n == 0.0 || n.is_nan() => {
                self.errors.push(format!("{} is required", field));
                0.0
            }
            Some(Some(n)) => n,
        }
    }

    fn text(&mut self, field: &str, value: Option<String>) -> String {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => v,
            None => {
                self.errors.push(format!("{} is required", field));
                String::new()
            }
        }
    }

    fn timestamp(&mut self, field: &str, value: Option<String>) -> DateTime<Utc> {
        let text = self.text(field, value);
        if text.is_empty() {
            return DateTime::<Utc>::UNIX_EPOCH;
        }
        parse_timestamp(&text).unwrap_or_else(|| {
            self.errors.push(format!("{} must be a valid date-time", field));
            DateTime::<Utc>::UNIX_EPOCH
        })
    }
}

/// 초와 소수 초는 생략할 수 있는 날짜-시각 형식 (`T` 또는 공백 구분)
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// `2024-03-01T09:00:00Z`, `2024-03-01 09:00`, `2024-03-01T09:00:00+0900` 등을 읽습니다.
/// 시간대가 없으면 UTC로 간주합니다. 시간대는 `Z`, `+09:00`, `+0900` 모두 받습니다.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some((local, offset)) = split_offset(text) {
        let zoned = format!("{}{}", local, offset);
        return LOCAL_FORMATS.iter().find_map(|format| {
            DateTime::parse_from_str(&zoned, &format!("{}%z", format))
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        });
    }

    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

/// 끝에 붙은 시간대를 떼어 `+hhmm` 모양으로 돌려줍니다. 시간대가 없으면 None.
fn split_offset(text: &str) -> Option<(&str, String)> {
    if let Some(local) = text.strip_suffix('Z') {
        return Some((local, "+0000".to_string()));
    }

    // 날짜 부분의 '-'와 헷갈리지 않도록 시각 부분에서만 찾습니다.
    let time_start = text.find(['T', ' '])?;
    let sign_at = text[time_start..].rfind(['+', '-'])? + time_start;
    let offset = text[sign_at + 1..].replace(':', "");
    if offset.len() != 4 || !offset.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((&text[..sign_at], format!("{}{}", &text[sign_at..=sign_at], offset)))
}

impl TryFrom<CreateDrivingRecordRequest> for DrivingSession {
    type Error = ValidationError;

    fn try_from(req: CreateDrivingRecordRequest) -> Result<Self, Self::Error> {
        let mut check = FieldCheck { errors: Vec::new() };

        let user_id = check.number("userId", req.user_id.as_ref());
        if user_id < 0.0 || user_id.fract() != 0.0 {
            check.errors.push("userId must be a positive integer".to_string());
        }

        let scores = SubScores {
            cruise_control: check.number("cruiseControl", req.cruise_control.as_ref()),
            coasting: check.number("coasting", req.coasting.as_ref()),
            overspeed: check.number("overspeed", req.overspeed.as_ref()),
            high_torque: check.number("highTorque", req.high_torque.as_ref()),
            idling: check.number("idling", req.idling.as_ref()),
            anticipation: check.number("anticipation", req.anticipation.as_ref()),
        };
        let driving_time = check.number("drivingTime", req.driving_time.as_ref());
        let engine_on_time = check.number("engineOnTime", req.engine_on_time.as_ref());
        let distance = check.number("distance", req.distance.as_ref());
        let start_point = check.text("startPoint", req.start_point);
        let end_point = check.text("endPoint", req.end_point);
        let start_time = check.timestamp("startTime", req.start_time);
        let end_time = check.timestamp("endTime", req.end_time);

        if !check.errors.is_empty() {
            return Err(ValidationError {
                location: Location::Body,
                errors: check.errors,
            });
        }

        Ok(Self {
            user_id: user_id as i64,
            scores,
            driving_time,
            engine_on_time,
            distance,
            start_point,
            end_point,
            start_time,
            end_time,
            record_title: req.record_title,
        })
    }
}

/// 운전 기록을 채점하고 저장합니다.
///
/// 직전 기록은 저장 전에 읽습니다. 같은 사용자의 동시 요청끼리는
/// 서로의 기록을 보지 못할 수 있습니다.
pub async fn insert_driving_record(
    pool: &SqlitePool,
    req: CreateDrivingRecordRequest,
) -> Result<ScoreResult, AppError> {
    let session = DrivingSession::try_from(req)?;

    db::users::find_by_id(pool, session.user_id)
        .await?
        .ok_or(UserNotExist)?;

    let previous_total = db::find_latest_total_point(pool, session.user_id).await?;
    let total_point = session.scores.total();
    let card = scoring::score(&session.scores, previous_total);

    let record = NewDrivingRecord {
        user_id: session.user_id,
        record_title: scoring::record_title(
            session.record_title.as_deref(),
            &session.start_point,
            &session.end_point,
        ),
        scores: session.scores,
        driving_time: session.driving_time,
        engine_on_time: session.engine_on_time,
        date: Utc::now(),
        distance: session.distance,
        summary: scoring::summary(session.driving_time, session.engine_on_time),
        start_point: session.start_point,
        end_point: session.end_point,
        start_time: session.start_time,
        end_time: session.end_time,
        total_point,
    };

    let record_id = db::insert_driving_record(pool, &record).await?;
    tracing::info!(
        record_id,
        user_id = record.user_id,
        total_point,
        stars = card.stars,
        "driving record saved"
    );

    Ok(ScoreResult {
        record_id,
        total_point,
        card,
    })
}

pub async fn get_records_by_user_id(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<DrivingRecord>, AppError> {
    db::list_records_by_user(pool, user_id).await
}

pub async fn get_practical_courses(pool: &SqlitePool) -> Result<Vec<PracticalCourse>, AppError> {
    db::list_practical_courses(pool).await
}
