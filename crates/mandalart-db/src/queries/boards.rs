//! Database query functions for the `boards` table.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Board;

/// Insert a new board row. Returns the inserted board with server-generated
/// defaults (id, timestamps).
pub async fn insert_board(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    theme_color: &str,
) -> Result<Board> {
    let board = sqlx::query_as::<_, Board>(
        "INSERT INTO boards (user_id, title, theme_color) \
         VALUES ($1, $2, $3) \
         RETURNING *",
    )
    .bind(user_id)
    .bind(title)
    .bind(theme_color)
    .fetch_one(pool)
    .await
    .context("failed to insert board")?;

    Ok(board)
}

/// Fetch a board by its ID.
pub async fn get_board(pool: &PgPool, id: Uuid) -> Result<Option<Board>> {
    let board = sqlx::query_as::<_, Board>("SELECT * FROM boards WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch board")?;

    Ok(board)
}

/// Fetch the most recently created board for a user, if any.
pub async fn latest_board_for_user(pool: &PgPool, user_id: Uuid) -> Result<Option<Board>> {
    let board = sqlx::query_as::<_, Board>(
        "SELECT * FROM boards WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .context("failed to fetch latest board for user")?;

    Ok(board)
}

/// Update the title of a board.
pub async fn update_board_title(pool: &PgPool, id: Uuid, title: &str) -> Result<()> {
    let result = sqlx::query("UPDATE boards SET title = $1, updated_at = now() WHERE id = $2")
        .bind(title)
        .bind(id)
        .execute(pool)
        .await
        .context("failed to update board title")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("board {id} not found");
    }

    Ok(())
}
