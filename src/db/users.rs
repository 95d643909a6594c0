use crate::error::AppError;
use crate::models::User;
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, user_id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, name
        FROM users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
