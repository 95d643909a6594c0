//! # 운전 기록 API 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/driving-records | `create_record` | 기록 채점 후 저장 (201) |
//! | GET | /api/driving-records/practical-courses | `list_practical_courses` | 실습 코스 목록 |
//! | GET | /api/driving-records/user/{userId} | `list_records` | 사용자의 운전 기록 |
//!
//! 기록 생성 본문은 여기서 규칙 목록 하나로 한 번에 검사합니다.
//! 누락, 타입, 형식 위반을 모두 모은 뒤에야 서비스 계층으로 넘깁니다.

use super::{response, user_id_param, AppState};
use crate::{
    error::AppError,
    middleware::validation::{
        is_nonzero_number, is_positive_id, validate, FieldType, Location, Rule, ValidationError,
    },
    models::CreateDrivingRecordRequest,
    services,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

/// `2024-05-01T08:00:00Z`, `2024-05-01 08:00`, `2024-05-01T08:30:00+0900` 같은 날짜-시각 문자열.
/// `services::driving_records::parse_timestamp`가 읽을 수 있는 모양과 같아야 합니다.
const DATE_TIME_PATTERN: &str =
    r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})?$";

/// 0이면 안 되는 숫자 필드 (숫자 문자열 허용)
const NUMERIC_FIELDS: [&str; 9] = [
    "cruiseControl",
    "coasting",
    "overspeed",
    "highTorque",
    "idling",
    "anticipation",
    "drivingTime",
    "engineOnTime",
    "distance",
];

/// 예전 클라이언트가 보내던 필드 이름 → 현재 이름
const LEGACY_NAMES: [(&str, &str); 3] = [
    ("cruisecontrol", "cruiseControl"),
    ("costing", "coasting"),
    ("hightorque", "highTorque"),
];

fn create_record_rules() -> Result<Vec<Rule>, AppError> {
    let date_time =
        Regex::new(DATE_TIME_PATTERN).map_err(|e| AppError::Internal(e.to_string()))?;

    let mut rules = vec![Rule::new("userId").required().custom(is_positive_id)];
    rules.extend(
        NUMERIC_FIELDS
            .into_iter()
            .map(|field| Rule::new(field).required().custom(is_nonzero_number)),
    );
    rules.extend(
        ["startPoint", "endPoint"]
            .into_iter()
            .map(|field| Rule::new(field).required().of_type(FieldType::String)),
    );
    rules.extend(["startTime", "endTime"].into_iter().map(|field| {
        Rule::new(field)
            .required()
            .of_type(FieldType::String)
            .pattern(date_time.clone())
    }));
    rules.push(Rule::new("recordTitle").of_type(FieldType::String));
    Ok(rules)
}

/// 예전 이름으로 온 값을 현재 이름으로 옮깁니다. 둘 다 있으면 현재 이름이 이깁니다.
fn rename_legacy_fields(body: &mut Value) {
    let Some(object) = body.as_object_mut() else {
        return;
    };
    for (legacy, current) in LEGACY_NAMES {
        if let Some(value) = object.remove(legacy) {
            object.entry(current).or_insert(value);
        }
    }
}

pub async fn create_record(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(mut body) = body?;
    rename_legacy_fields(&mut body);
    validate(Location::Body, &body, &create_record_rules()?)?;

    // 규칙을 통과했으면 타입은 이미 맞습니다.
    let req: CreateDrivingRecordRequest = serde_json::from_value(body)
        .map_err(|e| ValidationError::single(Location::Body, e.to_string()))?;

    let result = services::driving_records::insert_driving_record(&state.pool, req).await?;
    Ok(response::created(result))
}

pub async fn list_practical_courses(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let courses = services::driving_records::get_practical_courses(&state.pool).await?;
    Ok(response::success(courses))
}

pub async fn list_records(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let user_id = user_id_param(params)?;
    let records = services::driving_records::get_records_by_user_id(&state.pool, user_id).await?;
    Ok(response::success(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::driving_records::parse_timestamp;
    use serde_json::json;

    #[test]
    fn date_time_pattern_accepts_common_shapes() {
        let re = Regex::new(DATE_TIME_PATTERN).unwrap();
        assert!(re.is_match("2024-05-01T08:00:00Z"));
        assert!(re.is_match("2024-05-01T08:00:00.123+09:00"));
        assert!(re.is_match("2024-05-01 08:00:00"));
        assert!(!re.is_match("yesterday"));
        assert!(!re.is_match("2024/05/01 08:00"));
    }

    #[test]
    fn every_shape_the_pattern_accepts_can_be_parsed() {
        let re = Regex::new(DATE_TIME_PATTERN).unwrap();
        for text in [
            "2024-05-01T08:00",
            "2024-05-01 08:00",
            "2024-05-01T08:00Z",
            "2024-05-01T08:00+09:00",
            "2024-05-01T08:30:00+0900",
            "2024-05-01 08:30:00.250-0130",
            "2024-05-01T08:30:00.5Z",
        ] {
            assert!(re.is_match(text), "pattern rejected {}", text);
            assert!(parse_timestamp(text).is_some(), "parser rejected {}", text);
        }
    }

    #[test]
    fn body_rules_collect_every_violation() {
        let rules = create_record_rules().unwrap();
        let body = json!({
            "userId": "abc",
            "cruiseControl": 0,
            "startPoint": 5,
            "startTime": "noon",
            "recordTitle": 7,
        });
        let err = validate(Location::Body, &body, &rules).unwrap_err();
        assert_eq!(
            err.errors,
            vec![
                "userId is invalid",
                "cruiseControl is invalid",
                "coasting is required",
                "overspeed is required",
                "highTorque is required",
                "idling is required",
                "anticipation is required",
                "drivingTime is required",
                "engineOnTime is required",
                "distance is required",
                "startPoint must be of type string",
                "endPoint is required",
                "startTime has invalid format",
                "endTime is required",
                "recordTitle must be of type string",
            ]
        );
    }

    #[test]
    fn legacy_names_are_moved_before_checking() {
        let mut body = json!({ "cruisecontrol": 91, "costing": "70", "highTorque": 60, "hightorque": 1 });
        rename_legacy_fields(&mut body);
        assert_eq!(body, json!({ "cruiseControl": 91, "coasting": "70", "highTorque": 60 }));
    }
}
