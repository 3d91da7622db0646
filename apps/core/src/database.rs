use crate::models::{ChatMessage, ReplySource, Role};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

/// Opens (creating if needed) the SQLite database and applies migrations.
pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    info!("Initializing database at: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("Database initialized and migrations applied.");

    Ok(pool)
}

// --- Chat messages ---

pub async fn add_chat_message(
    pool: &SqlitePool,
    user_id: &str,
    role: Role,
    content: &str,
    source: Option<ReplySource>,
) -> Result<ChatMessage, sqlx::Error> {
    let created_at = Utc::now().timestamp_millis();

    sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO chat_messages (user_id, role, content, source, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, user_id, role, content, source, created_at
        "#,
    )
    .bind(user_id)
    .bind(role.as_str())
    .bind(content)
    .bind(source.map(|s| s.as_str()))
    .bind(created_at)
    .fetch_one(pool)
    .await
}

/// The newest `limit` messages of a user, oldest first.
pub async fn get_chat_history(
    pool: &SqlitePool,
    user_id: &str,
    limit: i64,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    let mut messages = sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, user_id, role, content, source, created_at
        FROM chat_messages
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    messages.reverse();
    Ok(messages)
}

/// Deletes every message of a user and returns how many were removed.
pub async fn clear_chat_history(pool: &SqlitePool, user_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM chat_messages WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
