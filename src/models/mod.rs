//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `car`: 차량과 소모품 교체 시기
//! - `course`: 실습 코스
//! - `driving_record`: 운전 기록, 채점 결과, 기록 생성 요청
//! - `poi`: T map 주변 검색 결과
//! - `user`: 사용자
//!
//! API 응답의 JSON 필드 이름은 camelCase입니다 (`recordId`, `totalPoint` 등).

pub mod car;
pub mod course;
pub mod driving_record;
pub mod poi;
pub mod user;

pub use car::*;
pub use course::*;
pub use driving_record::*;
pub use poi::*;
pub use user::*;
