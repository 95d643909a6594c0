use crate::error::AppError;
use crate::models::Car;
use sqlx::SqlitePool;

pub async fn list_cars_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Car>, AppError> {
    let cars = sqlx::query_as::<_, Car>(
        r#"
        SELECT car_id, user_id, manufacturer, model, km,
               oil, oil_filter, air_cleaner, transmission_fluid,
               brake_fluid, spark_plug, timing_belt,
               hood, trunk, head_lamp, rear_lamp, front_door, roof,
               front_tire, rear_tire
        FROM cars
        WHERE user_id = ?
        ORDER BY car_id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(cars)
}
