//! Action plan manager.
//!
//! Owns one cell's plan and completion log for the lifetime of a detail
//! view: `Idle -> Fetching -> {HasPlan, NoPlan}`. Log toggling is an
//! idempotent add/remove per calendar date; every toggle recomputes the
//! owning cell's progress and persists it through the board manager's
//! update path.

use std::fmt;

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use mandalart_db::models::{ActionLog, ActionPlan, LogStatus, PlanKind};
use mandalart_db::queries::{action_logs, action_plans};

use crate::Error;
use crate::board::BoardManager;
use crate::progress;

/// Fetch state of a plan manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanState {
    Idle,
    Fetching,
    NoPlan,
    HasPlan,
}

impl PlanState {
    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::NoPlan => "without a plan",
            Self::HasPlan => "holding a plan",
        }
    }
}

impl fmt::Display for PlanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Manager for one cell's action plan and its dated completion log.
pub struct PlanManager {
    pool: PgPool,
    cell_id: Uuid,
    state: PlanState,
    plan: Option<ActionPlan>,
    logs: Vec<ActionLog>,
    /// Month the progress percentage is computed against. Starts as the
    /// current month; follows the detail view's month navigation.
    reference_month: NaiveDate,
}

impl PlanManager {
    /// Create a manager for one cell's detail view. Nothing is fetched
    /// until [`open`](Self::open).
    pub fn new(pool: PgPool, cell_id: Uuid) -> Self {
        Self {
            pool,
            cell_id,
            state: PlanState::Idle,
            plan: None,
            logs: Vec::new(),
            reference_month: Utc::now().date_naive(),
        }
    }

    /// Fetch the cell's authoritative plan and, when present, its logs.
    ///
    /// The data model permits several plans per cell; the first created one
    /// is treated as authoritative. A remote failure restores `Idle` so the
    /// fetch can be reissued.
    pub async fn open(&mut self) -> Result<PlanState, Error> {
        self.state = PlanState::Fetching;

        let plan = match action_plans::first_plan_for_cell(&self.pool, self.cell_id).await {
            Ok(plan) => plan,
            Err(e) => {
                self.state = PlanState::Idle;
                return Err(Error::remote("fetching the action plan", e));
            }
        };

        match plan {
            Some(plan) => {
                let logs = match action_logs::list_logs_for_plan(&self.pool, plan.id).await {
                    Ok(logs) => logs,
                    Err(e) => {
                        self.state = PlanState::Idle;
                        return Err(Error::remote("fetching action logs", e));
                    }
                };
                self.plan = Some(plan);
                self.logs = logs;
                self.state = PlanState::HasPlan;
            }
            None => {
                self.plan = None;
                self.logs.clear();
                self.state = PlanState::NoPlan;
            }
        }

        Ok(self.state)
    }

    /// Attach a recurrence plan to the cell, starting today.
    ///
    /// Only valid while the cell has no plan. A non-positive target count
    /// is coerced to 1 rather than rejected.
    pub async fn create_plan(&mut self, kind: PlanKind, target_count: i32) -> Result<(), Error> {
        if self.state != PlanState::NoPlan {
            return Err(Error::InvalidState {
                op: "create plan",
                state: self.state.name(),
            });
        }

        let target_count = target_count.max(1);
        let today = Utc::now().date_naive();

        let plan =
            action_plans::insert_action_plan(&self.pool, self.cell_id, kind, target_count, today)
                .await
                .map_err(|e| Error::remote("creating the action plan", e))?;

        info!(cell_id = %self.cell_id, plan_id = %plan.id, %kind, target_count, "created action plan");
        self.plan = Some(plan);
        self.logs.clear();
        self.state = PlanState::HasPlan;
        Ok(())
    }

    /// Toggle the completion log for a date, then recompute and persist the
    /// owning cell's progress.
    ///
    /// Toggling is idempotent per date: an existing entry is removed, a
    /// missing one is recorded as `DONE`. Dates after today are rejected
    /// before any remote call.
    pub async fn toggle_log(
        &mut self,
        board: &mut BoardManager,
        date: NaiveDate,
    ) -> Result<(), Error> {
        self.toggle_log_as_of(board, date, Utc::now().date_naive())
            .await
    }

    /// Like [`toggle_log`](Self::toggle_log) with an explicit "today"
    /// bounding which dates are loggable.
    pub async fn toggle_log_as_of(
        &mut self,
        board: &mut BoardManager,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), Error> {
        if self.state != PlanState::HasPlan {
            return Err(Error::InvalidState {
                op: "toggle log",
                state: self.state.name(),
            });
        }
        let plan_id = match self.plan.as_ref() {
            Some(plan) => plan.id,
            None => return Err(Error::NotFound("action plan")),
        };

        if date > today {
            return Err(Error::Rejected("future dates cannot be logged"));
        }

        if let Some(index) = self.logs.iter().position(|log| log.log_date == date) {
            let log_id = self.logs[index].id;
            action_logs::delete_log(&self.pool, log_id)
                .await
                .map_err(|e| Error::remote("removing the action log", e))?;
            self.logs.remove(index);
        } else {
            let log = action_logs::insert_log(&self.pool, plan_id, date, LogStatus::Done)
                .await
                .map_err(|e| Error::remote("recording the action log", e))?;
            self.logs.push(log);
        }

        let progress = progress::month_progress(&self.logs, self.reference_month);
        board.set_cell_progress(self.cell_id, progress).await?;
        Ok(())
    }

    /// Change the month the progress percentage is computed against.
    pub fn set_reference_month(&mut self, month: NaiveDate) {
        self.reference_month = month;
    }

    pub fn reference_month(&self) -> NaiveDate {
        self.reference_month
    }

    pub fn state(&self) -> PlanState {
        self.state
    }

    pub fn cell_id(&self) -> Uuid {
        self.cell_id
    }

    pub fn plan(&self) -> Option<&ActionPlan> {
        self.plan.as_ref()
    }

    /// The loaded completion log.
    pub fn logs(&self) -> &[ActionLog] {
        &self.logs
    }

    /// Whether a log entry exists for a date.
    pub fn is_logged(&self, date: NaiveDate) -> bool {
        self.logs.iter().any(|log| log.log_date == date)
    }
}
