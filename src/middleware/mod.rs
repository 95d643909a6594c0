//! # 미들웨어 모듈
//!
//! - `validation`: 선언적 규칙 기반 요청 검증
//! - `error_envelope`: 에러 응답 본문에 요청 경로/메서드를 채우는 레이어

pub mod error_envelope;
pub mod validation;

pub use error_envelope::error_envelope;
