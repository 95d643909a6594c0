//! # T map 주변 검색(POI) 모델
//!
//! T map `pois/search/around` 응답 중 필요한 부분만 역직렬화하고,
//! 클라이언트에 내보낼 `PointOfInterest`로 정리합니다.

use serde::{Deserialize, Serialize};

/// 가까운 장소 하나
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointOfInterest {
    pub name: String,
    /// "시/도 시/군/구 읍/면/동 도로명 건물번호" 형태로 조합한 주소
    pub addr: String,
    pub longitude: String,
    pub latitude: String,
    pub radius: String,
}

/// 주변 검색 요청 본문: `POST /api/tmap/search`, `POST /api/tmap/gas-stations`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoiSearchRequest {
    pub longitude: f64,
    pub latitude: f64,
    pub search_keyword: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TmapSearchResponse {
    pub search_poi_info: Option<TmapPoiInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TmapPoiInfo {
    #[serde(default)]
    pub pois: TmapPois,
}

#[derive(Debug, Default, Deserialize)]
pub struct TmapPois {
    #[serde(default)]
    pub poi: Vec<TmapPoi>,
}

/// T map이 돌려주는 POI 원본. 숫자 값도 문자열로 옵니다.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TmapPoi {
    pub name: String,
    pub upper_addr_name: String,
    pub middle_addr_name: String,
    pub lower_addr_name: String,
    pub road_name: String,
    pub building_no1: String,
    pub building_no2: String,
    pub front_lon: String,
    pub front_lat: String,
    pub radius: String,
}

impl TmapPoi {
    /// 건물 부번(`buildingNo2`)은 0이 아닌 숫자일 때만 붙입니다.
    pub fn address(&self) -> String {
        let mut addr = format!(
            "{} {} {} {} {}",
            self.upper_addr_name,
            self.middle_addr_name,
            self.lower_addr_name,
            self.road_name,
            self.building_no1
        );
        let sub_number = self.building_no2.trim();
        if sub_number.parse::<f64>().is_ok_and(|n| n != 0.0) {
            addr.push(' ');
            addr.push_str(sub_number);
        }
        addr
    }
}

impl From<TmapPoi> for PointOfInterest {
    fn from(poi: TmapPoi) -> Self {
        Self {
            addr: poi.address(),
            name: poi.name,
            longitude: poi.front_lon,
            latitude: poi.front_lat,
            radius: poi.radius,
        }
    }
}

impl TmapSearchResponse {
    pub fn into_points(self) -> Vec<PointOfInterest> {
        self.search_poi_info
            .map(|info| info.pois.poi.into_iter().map(PointOfInterest::from).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_tmap_payload_to_points() {
        let body = json!({
            "searchPoiInfo": {
                "totalCount": "2",
                "pois": {
                    "poi": [
                        {
                            "name": "SK에너지 강남주유소",
                            "upperAddrName": "서울",
                            "middleAddrName": "강남구",
                            "lowerAddrName": "역삼동",
                            "roadName": "테헤란로",
                            "buildingNo1": "152",
                            "buildingNo2": "0",
                            "frontLon": "127.03642",
                            "frontLat": "37.50028",
                            "radius": "0.231"
                        },
                        {
                            "name": "GS칼텍스 삼성주유소",
                            "upperAddrName": "서울",
                            "middleAddrName": "강남구",
                            "lowerAddrName": "삼성동",
                            "roadName": "영동대로",
                            "buildingNo1": "513",
                            "buildingNo2": "12",
                            "frontLon": "127.05911",
                            "frontLat": "37.51187",
                            "radius": "1.2"
                        }
                    ]
                }
            }
        });

        let response: TmapSearchResponse = serde_json::from_value(body).unwrap();
        let points = response.into_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].addr, "서울 강남구 역삼동 테헤란로 152");
        assert_eq!(points[0].longitude, "127.03642");
        assert_eq!(points[1].addr, "서울 강남구 삼성동 영동대로 513 12");
        assert_eq!(points[1].radius, "1.2");
    }

    #[test]
    fn missing_poi_info_is_empty() {
        let response: TmapSearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_points().is_empty());
    }

    #[test]
    fn blank_building_sub_number_is_skipped() {
        let poi = TmapPoi {
            upper_addr_name: "부산".to_string(),
            middle_addr_name: "해운대구".to_string(),
            lower_addr_name: "우동".to_string(),
            road_name: "해운대로".to_string(),
            building_no1: "7".to_string(),
            ..Default::default()
        };
        assert_eq!(poi.address(), "부산 해운대구 우동 해운대로 7");
    }
}
