//! # 운전 점수 계산(Scorer)
//!
//! 세부 점수 여섯 개로부터 별점, 세 가지 평가 등급, 이전 기록 대비 설명을 만듭니다.
//! DB나 I/O 없이 값만 계산하는 순수 함수들입니다.
//!
//! ## 등급 기준
//! - 80 초과 → Excellent
//! - 60 초과 → Good
//! - 그 외 → Bad
//!
//! 속도(speed)는 `overspeed`, 운전 매너(morality)는 `idling`,
//! 연비(fuelEfficiency)는 `cruiseControl` 점수로 판정합니다.

use crate::models::SubScores;
use serde::Serialize;

/// 만점 (세부 점수 6개 × 100)
pub const MAX_TOTAL_POINT: f64 = 600.0;

/// 별점 계단: (이 점수를 **초과**하면, 별점)
///
/// 600점 만점(5점)은 `stars`에서 따로 처리합니다.
/// 비교가 `>`이므로 60의 배수 경계값은 한 칸 아래 별점입니다. (540점 → 4.0)
const STAR_STEPS: [(f64, f64); 9] = [
    (540.0, 4.5),
    (480.0, 4.0),
    (420.0, 3.5),
    (360.0, 3.0),
    (300.0, 2.5),
    (240.0, 2.0),
    (180.0, 1.5),
    (120.0, 1.0),
    (60.0, 0.5),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    Bad,
    Good,
    Excellent,
}

/// 평가 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub stars: f64,
    pub speed: Grade,
    pub morality: Grade,
    pub fuel_efficiency: Grade,
    pub description: String,
}

pub fn grade(value: f64) -> Grade {
    if value > 80.0 {
        Grade::Excellent
    } else if value > 60.0 {
        Grade::Good
    } else {
        Grade::Bad
    }
}

/// totalPoint를 반 개 단위 별점(0~5)으로 바꿉니다.
pub fn stars(total_point: f64) -> f64 {
    if total_point == MAX_TOTAL_POINT {
        return 5.0;
    }
    STAR_STEPS
        .iter()
        .find(|(threshold, _)| total_point > *threshold)
        .map(|(_, stars)| *stars)
        .unwrap_or(0.0)
}

/// 제목이 비어 있으면 "From {출발지} to {도착지}"를 씁니다.
pub fn record_title(title: Option<&str>, start_point: &str, end_point: &str) -> String {
    match title.filter(|t| !t.is_empty()) {
        Some(title) => title.to_string(),
        None => format!("From {} to {}", start_point, end_point),
    }
}

/// 기록에 저장되는 요약 문장. 상위 백분위는 `100 - (운전 시간 - 시동 시간)`입니다.
pub fn summary(driving_time: f64, engine_on_time: f64) -> String {
    let top = 100.0 - (driving_time - engine_on_time);
    format!(
        "You scored in the top {}%.\nCompared to the average user, the ability to recognize \
         information and comply with speed is better, but the ability to park is insufficient.",
        top
    )
}

/// 직전 기록과 비교한 설명. 직전 기록이 없으면 첫 기록 안내를 돌려줍니다.
pub fn describe_delta(total_point: f64, previous_total: Option<f64>) -> String {
    let Some(previous) = previous_total else {
        return "This is your first driving record.".to_string();
    };

    let diff = total_point - previous;
    if diff > 0.0 {
        format!("Compared to the last driving, the skill score increased by {} points", diff)
    } else if diff < 0.0 {
        format!("Compared to the last driving, the skill score decreased by {} points", -diff)
    } else {
        "Compared to the last driving, the skill score did not change".to_string()
    }
}

pub fn score(scores: &SubScores, previous_total: Option<f64>) -> ScoreCard {
    let total_point = scores.total();
    ScoreCard {
        stars: stars(total_point),
        speed: grade(scores.overspeed),
        morality: grade(scores.idling),
        fuel_efficiency: grade(scores.cruise_control),
        description: describe_delta(total_point, previous_total),
    }
}
