//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `DB_MAX_CONNECTIONS`: 연결 풀 최대 크기
//! - `HOST`, `PORT`: 서버 바인딩 주소
//! - `APP_ENV`: 실행 환경 (`development` | `production`)
//! - `TMAP_API_KEY`, `TMAP_API_URL`: T map POI 검색 API 접속 정보
//!
//! 설정은 서버 시작 시 한 번만 만들어지고, `AppState`를 통해
//! 필요한 곳에 전달됩니다. 전역 static 설정 홀더는 두지 않습니다.

// std::env: Rust 표준 라이브러리의 환경변수 모듈
use std::env;

// Copy: 대입이나 인자 전달 때 소유권이 이동하지 않고 값이 복사됩니다.
// 그래서 `fn is_development(self)`처럼 값으로 받아도 원본을 계속 쓸 수 있습니다.

/// 실행 환경
///
/// 5xx 에러 응답에 원본 메시지와 details를 노출할지 결정합니다.
/// - `Development`: 원본 메시지와 details 노출
/// - `Production`: 일반적인 메시지로 대체
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// `APP_ENV` 값을 해석합니다. 알 수 없는 값은 개발 환경으로 취급합니다.
    pub fn parse(value: &str) -> Self {
        // match는 모든 경우를 다뤄야 컴파일됩니다. `_`는 "그 밖의 모든 값"입니다.
        // String을 &str 패턴과 비교하려면 .as_str()로 빌려와야 합니다.
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

/// 애플리케이션 전체 설정을 담는 구조체
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/chobo.db")
    pub database_url: String,
    /// 연결 풀 최대 연결 수 (기본값: 5)
    pub db_max_connections: u32,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    /// u16: 0~65535 범위라 포트 번호에 딱 맞습니다. 범위를 벗어난 값은 파싱 단계에서 걸러집니다.
    pub port: u16,
    /// 실행 환경 (기본값: 개발)
    pub environment: Environment,
    /// T map 앱 키. 비어 있으면 T map이 401로 응답합니다.
    pub tmap_api_key: String,
    /// T map API 기본 URL
    pub tmap_api_url: String,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            // `?`: 변수가 없으면 VarError를 그대로 호출자(main)에게 돌려줍니다.
            database_url: env::var("DATABASE_URL")?,
            // .ok(): Result → Option 변환, .and_then(): 값이 있을 때만 파싱 시도.
            // 없거나 숫자가 아니면 기본값 5를 씁니다.
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            // unwrap_or_else: 에러일 때만 클로저를 실행해 기본값을 만듭니다.
            // (unwrap_or와 달리 기본 String을 미리 할당하지 않습니다)
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            // .parse(): 문자열 → u16. 반환 타입을 보고 컴파일러가 파싱 대상을 추론합니다.
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            environment: env::var("APP_ENV")
                .map(|v| Environment::parse(&v))
                .unwrap_or(Environment::Development),
            // unwrap_or_default(): 없으면 String::default(), 즉 빈 문자열
            tmap_api_key: env::var("TMAP_API_KEY").unwrap_or_default(),
            tmap_api_url: env::var("TMAP_API_URL")
                .unwrap_or_else(|_| "https://apis.openapi.sk.com/tmap".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_environment_names() {
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse(" PROD "), Environment::Production);
        assert_eq!(Environment::parse("development"), Environment::Development);
        assert_eq!(Environment::parse("staging"), Environment::Development);
        assert!(Environment::parse("").is_development());
    }
}
