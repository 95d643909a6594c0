//! # T map 검색 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/tmap/search` + `{ longitude, latitude, searchKeyword }` → 주변 목적지
//! - `POST /api/tmap/gas-stations` + `{ longitude, latitude }` → 주변 주유소

use super::{response, AppState};
use crate::{
    error::AppError,
    middleware::validation::{validate, FieldType, Location, Rule, ValidationError},
    models::PoiSearchRequest,
    services::tmap::GAS_STATION_KEYWORD,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

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

fn parse_body(body: Value, rules: &[Rule]) -> Result<PoiSearchRequest, AppError> {
    validate(Location::Body, &body, rules)?;
    let req = serde_json::from_value(body)
        .map_err(|e| ValidationError::single(Location::Body, e.to_string()))?;
    Ok(req)
}

pub async fn search(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = body?;
    let mut rules = coordinate_rules();
    rules.push(
        Rule::new("searchKeyword")
            .required()
            .of_type(FieldType::String)
            .min(1.0),
    );
    let req = parse_body(body, &rules)?;
    let keyword = req.search_keyword.unwrap_or_default();

    let points = state.tmap.search(req.longitude, req.latitude, &keyword).await?;
    Ok(response::success(points))
}

pub async fn gas_stations(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = body?;
    let req = parse_body(body, &coordinate_rules())?;

    let points = state
        .tmap
        .search(req.longitude, req.latitude, GAS_STATION_KEYWORD)
        .await?;
    Ok(response::success(points))
}
