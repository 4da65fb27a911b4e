//! Board state manager.
//!
//! Owns the in-memory representation of one board (title row, the 81 cells
//! ordered by position, and the authoritative plan per cell) and mediates
//! every mutation. Load lifecycle: `Unloaded -> Loading -> {Ready, Failed}`;
//! mutations are available only in `Ready`.
//!
//! Content edits on a linked position are mirrored to the counterpart cell
//! with a second, independent write issued after the primary one. A failed
//! mirror leaves the primary edit in place locally and remotely; the linked
//! pair stays out of sync until the next successful write or reload.

use std::collections::HashMap;
use std::fmt;

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use mandalart_db::models::{ActionPlan, Board, Cell};
use mandalart_db::queries::cells::NewCell;
use mandalart_db::queries::{action_plans, boards, cells};

use crate::Error;
use crate::grid;
use crate::session::Session;
use crate::stats::BoardStats;

/// Title given to a board synthesized on first access.
pub const DEFAULT_TITLE: &str = "My Goals";

/// Theme color given to a board synthesized on first access.
pub const DEFAULT_THEME_COLOR: &str = "#F59E0B";

/// Load state of a board manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardState {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

impl BoardState {
    fn name(self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Manager for one user's board.
pub struct BoardManager {
    pool: PgPool,
    session: Session,
    state: BoardState,
    board: Option<Board>,
    /// All 81 cells, ordered by position ascending.
    cells: Vec<Cell>,
    /// Authoritative plan per cell, keyed by cell id.
    plans: HashMap<Uuid, ActionPlan>,
}

impl BoardManager {
    /// Create an unloaded manager bound to a session.
    pub fn new(pool: PgPool, session: Session) -> Self {
        Self {
            pool,
            session,
            state: BoardState::Unloaded,
            board: None,
            cells: Vec::new(),
            plans: HashMap::new(),
        }
    }

    /// Load the session user's most recent board, creating one with 81
    /// empty cells when none exists yet.
    ///
    /// Transitions to `Ready` on success and `Failed` on any persistence
    /// failure; failures are reported once and never retried here. An
    /// anonymous session is rejected before any remote call.
    pub async fn load_or_create(&mut self) -> Result<(), Error> {
        let user_id = self.session.user_id()?;
        self.state = BoardState::Loading;

        let existing = match boards::latest_board_for_user(&self.pool, user_id).await {
            Ok(board) => board,
            Err(e) => return self.fail("loading the board", e),
        };

        let (board, cells) = match existing {
            Some(board) => {
                match cells::list_cells_for_board(&self.pool, board.id).await {
                    Ok(cells) => (board, cells),
                    Err(e) => return self.fail("loading cells", e),
                }
            }
            None => match self.create_board(user_id).await {
                Ok(created) => created,
                Err(e) => return self.fail("creating the board", e),
            },
        };

        let plans = match action_plans::list_plans_for_board(&self.pool, board.id).await {
            Ok(plans) => plans,
            Err(e) => return self.fail("loading plans", e),
        };

        self.plans = plans.into_iter().map(|p| (p.cell_id, p)).collect();
        self.board = Some(board);
        self.cells = cells;
        self.state = BoardState::Ready;
        Ok(())
    }

    /// Synthesize a new board: default title and theme, then all 81 cells
    /// with levels precomputed from the grid topology, content empty,
    /// progress zero. Board row first, then the cell batch.
    async fn create_board(&self, user_id: Uuid) -> anyhow::Result<(Board, Vec<Cell>)> {
        let board =
            boards::insert_board(&self.pool, user_id, DEFAULT_TITLE, DEFAULT_THEME_COLOR).await?;

        let mut template = Vec::with_capacity(grid::CELL_COUNT as usize);
        for position in 0..grid::CELL_COUNT {
            // The loop never leaves the grid, so classification cannot fail.
            let level = grid::classify(position).map_err(anyhow::Error::from)?;
            template.push(NewCell { position, level });
        }
        let cells = cells::insert_board_cells(&self.pool, board.id, &template).await?;

        info!(board_id = %board.id, user_id = %user_id, "created board with 81 cells");
        Ok((board, cells))
    }

    fn fail(&mut self, action: &'static str, source: anyhow::Error) -> Result<(), Error> {
        self.state = BoardState::Failed;
        Err(Error::remote(action, source))
    }

    fn ensure_ready(&self, op: &'static str) -> Result<(), Error> {
        if self.state == BoardState::Ready {
            Ok(())
        } else {
            Err(Error::InvalidState {
                op,
                state: self.state.name(),
            })
        }
    }

    /// Rename the board.
    ///
    /// A whitespace-only title is rejected before any remote call; the
    /// prior title stands.
    pub async fn rename_board(&mut self, new_title: &str) -> Result<(), Error> {
        self.ensure_ready("rename board")?;
        let board = self.board.as_mut().ok_or(Error::NotFound("board"))?;

        if new_title.trim().is_empty() {
            return Err(Error::Rejected("board title must not be empty"));
        }

        boards::update_board_title(&self.pool, board.id, new_title)
            .await
            .map_err(|e| Error::remote("renaming the board", e))?;
        board.title = new_title.to_owned();
        Ok(())
    }

    /// Write new content to a cell and mirror it to the linked counterpart
    /// when the position has one among the loaded cells.
    ///
    /// The primary write and the mirror are independent, issued primary
    /// first. A failed mirror surfaces an error but does not revert the
    /// primary edit; local state is updated only for writes that succeeded.
    pub async fn set_cell_content(&mut self, cell_id: Uuid, content: &str) -> Result<(), Error> {
        self.ensure_ready("set cell content")?;
        let index = self
            .cells
            .iter()
            .position(|c| c.id == cell_id)
            .ok_or(Error::NotFound("cell"))?;
        let position = self.cells[index].position;

        cells::update_cell_content(&self.pool, cell_id, content)
            .await
            .map_err(|e| Error::remote("saving cell content", e))?;
        self.cells[index].content = content.to_owned();

        let Some(linked) = grid::linked_position(position)? else {
            return Ok(());
        };
        let Some(mirror_index) = self.cells.iter().position(|c| c.position == linked) else {
            return Ok(());
        };

        let mirror_id = self.cells[mirror_index].id;
        if let Err(e) = cells::update_cell_content(&self.pool, mirror_id, content).await {
            warn!(
                position,
                linked, "mirror write failed; pair out of sync until next reload"
            );
            return Err(Error::remote("mirroring cell content", e));
        }
        self.cells[mirror_index].content = content.to_owned();

        info!(position, linked, "mirrored cell content to linked position");
        Ok(())
    }

    /// Persist a recomputed progress value onto a cell.
    ///
    /// This is the update path the action plan manager goes through after
    /// every log toggle. Progress is clamped to the 0..=100 range.
    pub async fn set_cell_progress(&mut self, cell_id: Uuid, progress: f32) -> Result<(), Error> {
        self.ensure_ready("set cell progress")?;
        let index = self
            .cells
            .iter()
            .position(|c| c.id == cell_id)
            .ok_or(Error::NotFound("cell"))?;

        let progress = progress.clamp(0.0, 100.0);
        cells::update_cell_progress(&self.pool, cell_id, progress)
            .await
            .map_err(|e| Error::remote("saving cell progress", e))?;
        self.cells[index].progress = progress;
        Ok(())
    }

    /// Re-fetch all cells and their attached plans, replacing in-memory
    /// state wholesale (cells ordered by position ascending).
    pub async fn reload_cells(&mut self) -> Result<(), Error> {
        self.ensure_ready("reload cells")?;
        let board_id = self.board.as_ref().ok_or(Error::NotFound("board"))?.id;

        let cells = cells::list_cells_for_board(&self.pool, board_id)
            .await
            .map_err(|e| Error::remote("reloading cells", e))?;
        let plans = action_plans::list_plans_for_board(&self.pool, board_id)
            .await
            .map_err(|e| Error::remote("reloading plans", e))?;

        self.cells = cells;
        self.plans = plans.into_iter().map(|p| (p.cell_id, p)).collect();
        Ok(())
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// All loaded cells, ordered by position ascending.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, cell_id: Uuid) -> Option<&Cell> {
        self.cells.iter().find(|c| c.id == cell_id)
    }

    pub fn cell_at_position(&self, position: i32) -> Option<&Cell> {
        self.cells.iter().find(|c| c.position == position)
    }

    /// The authoritative plan attached to a cell, if one was loaded.
    pub fn plan_for_cell(&self, cell_id: Uuid) -> Option<&ActionPlan> {
        self.plans.get(&cell_id)
    }

    /// Dashboard statistics over the loaded cells.
    pub fn stats(&self) -> BoardStats {
        BoardStats::from_cells(&self.cells)
    }
}
