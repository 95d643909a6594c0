//! # 운전 기록 모델 정의
//!
//! ## 구조체 역할
//! - `DrivingRecord`: 저장된 운전 기록 (코스 성격 태그와 항목 평가 포함)
//! - `DriveAssessment`: 운전 기록별 항목 평가 한 행
//! - `SubScores`: 한 번의 운전을 평가하는 여섯 가지 세부 점수
//! - `CreateDrivingRecordRequest`: 기록 생성 요청 본문 (검증 전 원본)
//! - `NewDrivingRecord`: 채점까지 끝나 INSERT 직전인 기록

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 운전 기록 엔티티: DB의 `driving_records` 테이블 한 행에
/// `course_character`, `drive_assessment` 조회 결과를 붙인 형태입니다.
///
/// `#[sqlx(skip)]` 필드는 쿼리 결과에 없으므로 `Default`(빈 Vec)로 채워진 뒤
/// 조인 결과로 채웁니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DrivingRecord {
    pub record_id: i64,
    pub user_id: i64,
    pub record_title: String,
    pub cruise_control: f64,
    pub coasting: f64,
    pub overspeed: f64,
    pub high_torque: f64,
    pub idling: f64,
    pub anticipation: f64,
    /// 운전 시간 (분)
    pub driving_time: f64,
    /// 시동이 켜져 있던 시간 (분)
    pub engine_on_time: f64,
    /// 기록 생성 시각
    pub date: DateTime<Utc>,
    pub distance: f64,
    pub start_point: String,
    pub end_point: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_point: f64,
    pub summary: String,
    #[sqlx(skip)]
    pub character: Vec<String>,
    #[sqlx(skip)]
    pub assessments: Vec<DriveAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DriveAssessment {
    pub assessment_id: i64,
    pub record_id: i64,
    pub category: String,
    pub score: f64,
    pub comment: Option<String>,
}

/// 여섯 가지 세부 점수 (각각 0~100 기대, 범위 검사는 하지 않음)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub cruise_control: f64,
    pub coasting: f64,
    pub overspeed: f64,
    pub high_torque: f64,
    pub idling: f64,
    pub anticipation: f64,
}

impl SubScores {
    /// totalPoint: 여섯 점수의 합 (0~600)
    pub fn total(&self) -> f64 {
        self.cruise_control
            + self.coasting
            + self.overspeed
            + self.high_torque
            + self.idling
            + self.anticipation
    }
}

/// 숫자 또는 숫자 문자열: `"90"`과 `90`을 모두 받습니다.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// 숫자로 읽을 수 없는 문자열이면 None
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// 운전 기록 생성 요청: `POST /api/driving-records`의 요청 본문
///
/// 모든 필드가 Option인 이유: 누락된 필드를 역직렬화 단계에서 튕기지 않고
/// 서비스 계층에서 한꺼번에 모아 검증 에러로 돌려주기 위함입니다.
/// 예전 클라이언트의 필드 이름(`cruisecontrol`, `costing`, `hightorque`)도 받습니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDrivingRecordRequest {
    pub user_id: Option<Numeric>,
    #[serde(alias = "cruisecontrol")]
    pub cruise_control: Option<Numeric>,
    #[serde(alias = "costing")]
    pub coasting: Option<Numeric>,
    pub overspeed: Option<Numeric>,
    #[serde(alias = "hightorque")]
    pub high_torque: Option<Numeric>,
    pub idling: Option<Numeric>,
    pub anticipation: Option<Numeric>,
    pub driving_time: Option<Numeric>,
    pub engine_on_time: Option<Numeric>,
    pub distance: Option<Numeric>,
    pub start_point: Option<String>,
    pub end_point: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub record_title: Option<String>,
}

/// INSERT 직전의 운전 기록
#[derive(Debug, Clone)]
pub struct NewDrivingRecord {
    pub user_id: i64,
    pub record_title: String,
    pub scores: SubScores,
    pub driving_time: f64,
    pub engine_on_time: f64,
    pub date: DateTime<Utc>,
    pub distance: f64,
    pub start_point: String,
    pub end_point: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_point: f64,
    pub summary: String,
}
