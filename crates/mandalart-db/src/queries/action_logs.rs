//! Database query functions for the `action_logs` table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ActionLog, LogStatus};

/// Insert a log entry for a date. Returns the inserted row.
///
/// The table enforces one log per (plan, date); inserting a duplicate date
/// is an error.
pub async fn insert_log(
    pool: &PgPool,
    action_plan_id: Uuid,
    log_date: NaiveDate,
    status: LogStatus,
) -> Result<ActionLog> {
    let log = sqlx::query_as::<_, ActionLog>(
        "INSERT INTO action_logs (action_plan_id, log_date, status) \
         VALUES ($1, $2, $3) \
         RETURNING *",
    )
    .bind(action_plan_id)
    .bind(log_date)
    .bind(status)
    .fetch_one(pool)
    .await
    .context("failed to insert action log")?;

    Ok(log)
}

/// Delete a log entry by ID.
pub async fn delete_log(pool: &PgPool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM action_logs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to delete action log")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("action log {id} not found");
    }

    Ok(())
}

/// Fetch the log for a plan on a specific date, if one exists.
pub async fn find_log_by_date(
    pool: &PgPool,
    action_plan_id: Uuid,
    log_date: NaiveDate,
) -> Result<Option<ActionLog>> {
    let log = sqlx::query_as::<_, ActionLog>(
        "SELECT * FROM action_logs WHERE action_plan_id = $1 AND log_date = $2",
    )
    .bind(action_plan_id)
    .bind(log_date)
    .fetch_optional(pool)
    .await
    .context("failed to fetch action log by date")?;

    Ok(log)
}

/// List all logs for a plan, ordered by date ascending.
pub async fn list_logs_for_plan(pool: &PgPool, action_plan_id: Uuid) -> Result<Vec<ActionLog>> {
    let logs = sqlx::query_as::<_, ActionLog>(
        "SELECT * FROM action_logs WHERE action_plan_id = $1 ORDER BY log_date ASC",
    )
    .bind(action_plan_id)
    .fetch_all(pool)
    .await
    .context("failed to list logs for plan")?;

    Ok(logs)
}
