//! # 요청 검증(Validation) 계층
//!
//! 선언적인 규칙 목록으로 요청 데이터(JSON 본문, 쿼리, 경로 파라미터)를 검사합니다.
//!
//! ## 동작 방식
//! - 규칙은 선언된 순서대로 검사합니다.
//! - 첫 번째 위반에서 멈추지 않고 **모든** 위반 메시지를 모읍니다.
//! - 위반이 하나라도 있으면 `ValidationError`를 반환합니다.
//!
//! ## 필드별 검사 순서
//! 1. required: 값이 없거나(null 포함) 빈 문자열이면 위반, 이 필드의 나머지 검사는 건너뜀
//! 2. 필수가 아닌 필드가 없으면 나머지 검사를 모두 건너뜀
//! 3. 타입(type): 불일치하면 위반, 이 필드의 나머지 검사는 건너뜀
//! 4. min/max: 문자열은 길이, 숫자는 값의 범위
//! 5. pattern: 문자열일 때만 정규식 검사
//! 6. custom: 사용자 정의 판별 함수

use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// 검사 대상 데이터의 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Body,
    Query,
    Params,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Location::Body => "body",
            Location::Query => "query",
            Location::Params => "params",
        };
        f.write_str(name)
    }
}

/// JSON 원시 타입 구분
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl FieldType {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Object => value.is_object(),
            FieldType::Array => value.is_array(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
        }
    }
}

/// 필드 하나에 대한 검증 규칙
///
/// 빌더 메서드로 조립합니다:
/// ```ignore
/// Rule::new("latitude").required().of_type(FieldType::Number).min(-90.0).max(90.0)
/// ```
#[derive(Debug, Clone)]
pub struct Rule {
    pub field: &'static str,
    pub required: bool,
    pub field_type: Option<FieldType>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<Regex>,
    pub custom: Option<fn(&Value) -> bool>,
    /// 지정하면 이 필드의 모든 위반 메시지를 대체합니다.
    pub message: Option<&'static str>,
}

impl Rule {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            required: false,
            field_type: None,
            min: None,
            max: None,
            pattern: None,
            custom: None,
            message: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn of_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn custom(mut self, predicate: fn(&Value) -> bool) -> Self {
        self.custom = Some(predicate);
        self
    }

    pub fn message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    fn violation(&self, default: impl FnOnce() -> String) -> String {
        match self.message {
            Some(message) => message.to_string(),
            None => default(),
        }
    }
}

/// 검증 실패: 수집된 모든 위반 메시지를 담습니다.
#[derive(Debug, Clone, Error)]
#[error("Validation failed")]
pub struct ValidationError {
    pub location: Location,
    pub errors: Vec<String>,
}

impl ValidationError {
    /// 규칙 목록 밖에서 발견한 위반(예: 역직렬화 실패)을 감쌉니다.
    pub fn single(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            errors: vec![message.into()],
        }
    }
}

/// `data`를 규칙 목록으로 검사합니다.
///
/// `data`가 객체가 아니면 모든 필드를 "없음"으로 취급합니다.
pub fn validate(location: Location, data: &Value, rules: &[Rule]) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    for rule in rules {
        let value = data.get(rule.field);
        let absent = matches!(value, None | Some(Value::Null));

        if rule.required && (absent || value == Some(&Value::String(String::new()))) {
            errors.push(rule.violation(|| format!("{} is required", rule.field)));
            continue;
        }

        // 필수가 아닌 필드가 비어 있으면 나머지 검사는 의미가 없습니다.
        let Some(value) = value.filter(|_| !absent) else {
            continue;
        };

        if let Some(field_type) = rule.field_type {
            if !field_type.matches(value) {
                errors.push(rule.violation(|| {
                    format!("{} must be of type {}", rule.field, field_type.name())
                }));
                continue;
            }
        }

        match (rule.field_type, value) {
            (Some(FieldType::String), Value::String(text)) => {
                let length = text.chars().count() as f64;
                if let Some(min) = rule.min.filter(|min| length < *min) {
                    errors.push(rule.violation(|| {
                        format!("{} must be at least {} characters long", rule.field, min)
                    }));
                }
                if let Some(max) = rule.max.filter(|max| length > *max) {
                    errors.push(rule.violation(|| {
                        format!("{} must be at most {} characters long", rule.field, max)
                    }));
                }
            }
            (Some(FieldType::Number), Value::Number(number)) => {
                let number = number.as_f64().unwrap_or(f64::NAN);
                if let Some(min) = rule.min.filter(|min| number < *min) {
                    errors.push(rule.violation(|| format!("{} must be at least {}", rule.field, min)));
                }
                if let Some(max) = rule.max.filter(|max| number > *max) {
                    errors.push(rule.violation(|| format!("{} must be at most {}", rule.field, max)));
                }
            }
            _ => {}
        }

        if let (Some(pattern), Value::String(text)) = (&rule.pattern, value) {
            if !pattern.is_match(text) {
                errors.push(rule.violation(|| format!("{} has invalid format", rule.field)));
            }
        }

        if let Some(custom) = rule.custom {
            if !custom(value) {
                errors.push(rule.violation(|| format!("{} is invalid", rule.field)));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { location, errors })
    }
}

/// 경로/쿼리 파라미터 맵을 검사 가능한 JSON 객체로 바꿉니다.
/// 값은 모두 문자열로 남습니다.
pub fn params_to_value(params: HashMap<String, String>) -> Value {
    let map: Map<String, Value> = params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    Value::Object(map)
}

/// 숫자이거나 숫자로 읽히는 문자열이면 그 값을 돌려줍니다.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// 양의 정수 ID 판별 (숫자 또는 숫자 문자열)
pub fn is_positive_id(value: &Value) -> bool {
    as_number(value).is_some_and(|n| n > 0.0 && n.fract() == 0.0)
}

/// 0이 아닌 숫자 또는 숫자 문자열. 0은 값이 없는 것으로 봅니다.
pub fn is_nonzero_number(value: &Value) -> bool {
    as_number(value).is_some_and(|n| n != 0.0 && n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coordinate_rules() -> Vec<Rule> {
        vec![
            Rule::new("longitude")
                .required()
                .of_type(FieldType::Number)
                .min(-180.0)
                .max(180.0),
            Rule::new("latitude")
                .required()
                .of_type(FieldType::Number)
                .min(-90.0)
                .max(90.0),
        ]
    }

    #[test]
    fn passes_valid_payload() {
        let data = json!({ "longitude": 126.97, "latitude": 37.56 });
        assert!(validate(Location::Body, &data, &coordinate_rules()).is_ok());
    }

    #[test]
    fn collects_every_violation() {
        let data = json!({ "longitude": 200.0 });
        let err = validate(Location::Body, &data, &coordinate_rules()).unwrap_err();
        assert_eq!(err.location, Location::Body);
        assert_eq!(
            err.errors,
            vec![
                "longitude must be at most 180".to_string(),
                "latitude is required".to_string(),
            ]
        );
    }

    #[test]
    fn empty_string_and_null_fail_required() {
        let rules = vec![Rule::new("name").required(), Rule::new("title").required()];
        let data = json!({ "name": "", "title": null });
        let err = validate(Location::Body, &data, &rules).unwrap_err();
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn optional_absent_field_skips_all_checks() {
        let rules = vec![Rule::new("recordTitle")
            .of_type(FieldType::String)
            .min(3.0)
            .custom(|_| false)];
        assert!(validate(Location::Body, &json!({}), &rules).is_ok());
        assert!(validate(Location::Body, &json!({ "recordTitle": null }), &rules).is_ok());
    }

    #[test]
    fn type_mismatch_reports_once() {
        let rules = vec![Rule::new("latitude")
            .required()
            .of_type(FieldType::Number)
            .custom(|_| false)];
        let err = validate(Location::Body, &json!({ "latitude": "37.5" }), &rules).unwrap_err();
        assert_eq!(err.errors, vec!["latitude must be of type number".to_string()]);
    }

    #[test]
    fn string_length_bounds_count_characters() {
        let rules = vec![Rule::new("searchKeyword")
            .required()
            .of_type(FieldType::String)
            .min(2.0)
            .max(3.0)];
        assert!(validate(Location::Body, &json!({ "searchKeyword": "주유소" }), &rules).is_ok());
        let err = validate(Location::Body, &json!({ "searchKeyword": "주" }), &rules).unwrap_err();
        assert_eq!(
            err.errors,
            vec!["searchKeyword must be at least 2 characters long".to_string()]
        );
    }

    #[test]
    fn pattern_and_custom_messages() {
        let rules = vec![
            Rule::new("startTime").pattern(Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap()),
            Rule::new("userId")
                .required()
                .custom(is_positive_id)
                .message("User ID must be a positive number"),
        ];
        let err = validate(
            Location::Body,
            &json!({ "startTime": "yesterday", "userId": -3 }),
            &rules,
        )
        .unwrap_err();
        assert_eq!(
            err.errors,
            vec![
                "startTime has invalid format".to_string(),
                "User ID must be a positive number".to_string(),
            ]
        );
    }

    #[test]
    fn path_params_are_checked_as_strings() {
        let rules = vec![Rule::new("userId").required().custom(is_positive_id)];
        let ok = params_to_value(HashMap::from([("userId".to_string(), "12".to_string())]));
        assert!(validate(Location::Params, &ok, &rules).is_ok());

        let bad = params_to_value(HashMap::from([("userId".to_string(), "abc".to_string())]));
        let err = validate(Location::Params, &bad, &rules).unwrap_err();
        assert_eq!(err.location, Location::Params);
        assert_eq!(err.errors, vec!["userId is invalid".to_string()]);
    }

    #[test]
    fn positive_id_rejects_zero_fractions_and_negatives() {
        assert!(is_positive_id(&json!(1)));
        assert!(is_positive_id(&json!("42")));
        assert!(!is_positive_id(&json!(0)));
        assert!(!is_positive_id(&json!(-1)));
        assert!(!is_positive_id(&json!(1.5)));
        assert!(!is_positive_id(&json!(true)));
    }

    #[test]
    fn nonzero_number_accepts_numeric_strings() {
        assert!(is_nonzero_number(&json!(90)));
        assert!(is_nonzero_number(&json!("12.5")));
        assert!(is_nonzero_number(&json!(-10)));
        assert!(!is_nonzero_number(&json!(0)));
        assert!(!is_nonzero_number(&json!("0")));
        assert!(!is_nonzero_number(&json!("fast")));
        assert!(!is_nonzero_number(&json!([1])));
    }
}
