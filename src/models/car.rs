//! # 차량 모델 정의
//!
//! 소모품 컬럼(`oil`, `oil_filter` ...)은 마지막 교체 이후 주행한 거리(km)입니다.
//! 교체 주기에서 주행거리를 뺀 남은 거리가 `SWAP_LIMIT` 미만이면 교체 대상으로 표시합니다.

use serde::Serialize;

/// 교체 알림을 띄우는 남은 거리 기준 (km)
pub const SWAP_LIMIT: i64 = 500;

/// 소모품별 권장 교체 주기 (km)
pub mod change_interval {
    pub const OIL: i64 = 10_000;
    pub const OIL_FILTER: i64 = 10_000;
    pub const AIR_CLEANER: i64 = 15_000;
    pub const TRANSMISSION_FLUID: i64 = 50_000;
    pub const BRAKE_FLUID: i64 = 40_000;
    pub const SPARK_PLUG: i64 = 40_000;
    pub const TIMING_BELT: i64 = 80_000;
}

/// 차량 엔티티: DB의 `cars` 테이블 한 행
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub car_id: i64,
    pub user_id: i64,
    pub manufacturer: String,
    pub model: String,
    pub km: i64,
    pub oil: i64,
    pub oil_filter: i64,
    pub air_cleaner: i64,
    pub transmission_fluid: i64,
    pub brake_fluid: i64,
    pub spark_plug: i64,
    pub timing_belt: i64,
    pub hood: bool,
    pub trunk: bool,
    pub head_lamp: bool,
    pub rear_lamp: bool,
    pub front_door: bool,
    pub roof: bool,
    pub front_tire: bool,
    pub rear_tire: bool,
}

/// 소모품별 교체 필요 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapStatus {
    pub oil_swap: bool,
    pub oil_filter_swap: bool,
    pub air_cleaner_swap: bool,
    pub transmission_fluid_swap: bool,
    pub brake_fluid_swap: bool,
    pub spark_plug_swap: bool,
    pub timing_belt_swap: bool,
}

fn needs_swap(interval: i64, driven: i64) -> bool {
    interval - driven < SWAP_LIMIT
}

impl Car {
    pub fn swap_status(&self) -> SwapStatus {
        use change_interval::*;

        SwapStatus {
            oil_swap: needs_swap(OIL, self.oil),
            oil_filter_swap: needs_swap(OIL_FILTER, self.oil_filter),
            air_cleaner_swap: needs_swap(AIR_CLEANER, self.air_cleaner),
            transmission_fluid_swap: needs_swap(TRANSMISSION_FLUID, self.transmission_fluid),
            brake_fluid_swap: needs_swap(BRAKE_FLUID, self.brake_fluid),
            spark_plug_swap: needs_swap(SPARK_PLUG, self.spark_plug),
            timing_belt_swap: needs_swap(TIMING_BELT, self.timing_belt),
        }
    }
}

/// API 응답용 차량: 원본 컬럼과 교체 여부를 한 객체로 펼쳐서 내보냅니다.
#[derive(Debug, Clone, Serialize)]
pub struct CarResponse {
    #[serde(flatten)]
    pub car: Car,
    #[serde(flatten)]
    pub swap: SwapStatus,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        let swap = car.swap_status();
        Self { car, swap }
    }
}
