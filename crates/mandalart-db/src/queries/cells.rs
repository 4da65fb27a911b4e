//! Database query functions for the `cells` table.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Cell, CellLevel};

/// Parameters for one cell row at board creation.
#[derive(Debug, Clone, Copy)]
pub struct NewCell {
    pub position: i32,
    pub level: CellLevel,
}

/// Insert the full cell set for a freshly created board inside a single
/// transaction. If any insert fails, the entire batch is rolled back.
///
/// Returns the inserted cells in the order given (callers pass positions
/// ascending).
pub async fn insert_board_cells(
    pool: &PgPool,
    board_id: Uuid,
    cells: &[NewCell],
) -> Result<Vec<Cell>> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let mut inserted = Vec::with_capacity(cells.len());
    for cell in cells {
        let row = sqlx::query_as::<_, Cell>(
            "INSERT INTO cells (board_id, position, level) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(board_id)
        .bind(cell.position)
        .bind(cell.level)
        .fetch_one(&mut *tx)
        .await
        .with_context(|| format!("failed to insert cell at position {}", cell.position))?;

        inserted.push(row);
    }

    tx.commit().await.context("failed to commit transaction")?;

    Ok(inserted)
}

/// Fetch a single cell by ID.
pub async fn get_cell(pool: &PgPool, id: Uuid) -> Result<Option<Cell>> {
    let cell = sqlx::query_as::<_, Cell>("SELECT * FROM cells WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch cell")?;

    Ok(cell)
}

/// List all cells for a board, ordered by position ascending.
pub async fn list_cells_for_board(pool: &PgPool, board_id: Uuid) -> Result<Vec<Cell>> {
    let cells = sqlx::query_as::<_, Cell>(
        "SELECT * FROM cells WHERE board_id = $1 ORDER BY position ASC",
    )
    .bind(board_id)
    .fetch_all(pool)
    .await
    .context("failed to list cells for board")?;

    Ok(cells)
}

/// Update the content of a cell.
pub async fn update_cell_content(pool: &PgPool, id: Uuid, content: &str) -> Result<()> {
    let result = sqlx::query("UPDATE cells SET content = $1, updated_at = now() WHERE id = $2")
        .bind(content)
        .bind(id)
        .execute(pool)
        .await
        .context("failed to update cell content")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("cell {id} not found");
    }

    Ok(())
}

/// Update the progress of a cell.
pub async fn update_cell_progress(pool: &PgPool, id: Uuid, progress: f32) -> Result<()> {
    let result = sqlx::query("UPDATE cells SET progress = $1, updated_at = now() WHERE id = $2")
        .bind(progress)
        .bind(id)
        .execute(pool)
        .await
        .context("failed to update cell progress")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("cell {id} not found");
    }

    Ok(())
}
