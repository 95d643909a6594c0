//! # 서비스 계층
//!
//! 라우트 핸들러와 DB 계층 사이에서 도메인 규칙을 처리합니다.
//!
//! - `driving_records`: 운전 기록 검증/채점/저장, 기록과 실습 코스 조회
//! - `scoring`: 별점과 등급 계산 (순수 함수)
//! - `tmap`: T map 주변 장소 검색
//! - `users`: 사용자 상세, 차량 조회

pub mod driving_records;
pub mod scoring;
pub mod tmap;
pub mod users;
