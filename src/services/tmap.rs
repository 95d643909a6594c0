//! # T map 주변 장소(POI) 검색 클라이언트
//!
//! `GET {api_url}/pois/search/around` 를 호출해서 중심 좌표 반경 5km 안의 장소를 찾습니다.
//! 검색 결과가 없으면 T map은 본문 없이 204로 응답하므로 빈 목록으로 처리합니다.

use crate::{config::Config, error::AppError, models::*};
use reqwest::StatusCode;

/// 주유소 검색에 쓰는 기본 카테고리
pub const GAS_STATION_KEYWORD: &str = "주유소";

/// 검색 반경 (km)
const SEARCH_RADIUS_KM: &str = "5";

/// `reqwest::Client`는 내부적으로 커넥션 풀을 Arc로 공유하므로 clone 비용이 작습니다.
#[derive(Debug, Clone)]
pub struct TmapClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl TmapClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.tmap_api_url.trim_end_matches('/').to_string(),
            api_key: config.tmap_api_key.clone(),
        }
    }

    pub async fn search(
        &self,
        longitude: f64,
        latitude: f64,
        keyword: &str,
    ) -> Result<Vec<PointOfInterest>, AppError> {
        let url = format!("{}/pois/search/around", self.api_url);
        let center_lon = longitude.to_string();
        let center_lat = latitude.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("version", "1"),
                ("categories", keyword),
                ("centerLon", center_lon.as_str()),
                ("centerLat", center_lat.as_str()),
                ("radius", SEARCH_RADIUS_KM),
                ("appKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("T map request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(AppError::ExternalApi(format!("T map responded with {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::ExternalApi(format!("T map body read failed: {}", e)))?;
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let body: TmapSearchResponse = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::ExternalApi(format!("T map body decode failed: {}", e)))?;
        let points = body.into_points();
        tracing::debug!(keyword, count = points.len(), "T map search finished");
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use axum::{extract::Query, http::StatusCode as AxumStatus, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn spawn_mock(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(api_url: String) -> TmapClient {
        TmapClient::new(&Config {
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: Environment::Development,
            tmap_api_key: "test-key".to_string(),
            tmap_api_url: api_url,
        })
    }

    #[tokio::test]
    async fn forwards_query_and_maps_points() {
        let app = Router::new().route(
            "/pois/search/around",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                assert_eq!(query["version"], "1");
                assert_eq!(query["categories"], "주유소");
                assert_eq!(query["centerLon"], "127.03");
                assert_eq!(query["centerLat"], "37.5");
                assert_eq!(query["radius"], "5");
                assert_eq!(query["appKey"], "test-key");
                Json(json!({
                    "searchPoiInfo": { "pois": { "poi": [{
                        "name": "역삼주유소",
                        "upperAddrName": "서울",
                        "middleAddrName": "강남구",
                        "lowerAddrName": "역삼동",
                        "roadName": "논현로",
                        "buildingNo1": "508",
                        "buildingNo2": "3",
                        "frontLon": "127.0368",
                        "frontLat": "37.5031",
                        "radius": "0.8"
                    }]}}
                }))
            }),
        );
        let base = spawn_mock(app).await;

        let points = client(base)
            .search(127.03, 37.5, GAS_STATION_KEYWORD)
            .await
            .unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].name, "역삼주유소");
        assert_eq!(points[0].addr, "서울 강남구 역삼동 논현로 508 3");
    }

    #[tokio::test]
    async fn no_content_is_empty_list() {
        let app = Router::new().route("/pois/search/around", get(|| async { AxumStatus::NO_CONTENT }));
        let base = spawn_mock(app).await;

        let points = client(base).search(0.0, 0.0, "카페").await.unwrap();
        assert!(points.is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_is_external_api_error() {
        let app = Router::new().route(
            "/pois/search/around",
            get(|| async { (AxumStatus::UNAUTHORIZED, Json(json!({ "error": "key" }))) }),
        );
        let base = spawn_mock(app).await;

        let err = client(base).search(0.0, 0.0, "카페").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(ref m) if m.contains("401")));
    }

    #[tokio::test]
    async fn garbage_body_is_external_api_error() {
        let app = Router::new().route(
            "/pois/search/around",
            get(|| async { Json(Value::String("oops".to_string())) }),
        );
        let base = spawn_mock(app).await;

        let err = client(base).search(0.0, 0.0, "카페").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(_)));
    }
}
