//! Database query functions for the `action_plans` table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ActionPlan, PlanKind};

/// Insert a new action plan row. Returns the inserted plan with
/// server-generated defaults (id, timestamps).
pub async fn insert_action_plan(
    pool: &PgPool,
    cell_id: Uuid,
    kind: PlanKind,
    target_count: i32,
    start_date: NaiveDate,
) -> Result<ActionPlan> {
    let plan = sqlx::query_as::<_, ActionPlan>(
        "INSERT INTO action_plans (cell_id, kind, target_count, start_date) \
         VALUES ($1, $2, $3, $4) \
         RETURNING *",
    )
    .bind(cell_id)
    .bind(kind)
    .bind(target_count)
    .bind(start_date)
    .fetch_one(pool)
    .await
    .context("failed to insert action plan")?;

    Ok(plan)
}

/// Fetch the oldest plan for a cell, if any.
///
/// The data model permits several plans per cell; the first created one is
/// treated as authoritative throughout.
pub async fn first_plan_for_cell(pool: &PgPool, cell_id: Uuid) -> Result<Option<ActionPlan>> {
    let plan = sqlx::query_as::<_, ActionPlan>(
        "SELECT * FROM action_plans WHERE cell_id = $1 ORDER BY created_at ASC LIMIT 1",
    )
    .bind(cell_id)
    .fetch_optional(pool)
    .await
    .context("failed to fetch plan for cell")?;

    Ok(plan)
}

/// List the authoritative (oldest) plan of every cell in a board.
///
/// Used to attach plans to the cell snapshot after a load or reload.
pub async fn list_plans_for_board(pool: &PgPool, board_id: Uuid) -> Result<Vec<ActionPlan>> {
    let plans = sqlx::query_as::<_, ActionPlan>(
        "SELECT DISTINCT ON (p.cell_id) p.* \
         FROM action_plans p \
         JOIN cells c ON c.id = p.cell_id \
         WHERE c.board_id = $1 \
         ORDER BY p.cell_id, p.created_at ASC",
    )
    .bind(board_id)
    .fetch_all(pool)
    .await
    .context("failed to list plans for board")?;

    Ok(plans)
}
