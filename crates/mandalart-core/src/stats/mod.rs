//! Aggregate figures for a board's dashboard header.

use serde::Serialize;

use mandalart_db::models::{Cell, CellLevel};

/// Read-only statistics snapshot computed from the loaded cell set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardStats {
    /// The center cell's progress; while the center sits at zero, the mean
    /// of the sub-center progress values stands in for it.
    pub overall_progress: f32,
    /// Cells with non-empty content.
    pub filled_cells: usize,
    /// All cells on the board.
    pub total_cells: usize,
    /// Percentage of cells with non-empty content.
    pub completion_rate: f32,
    /// Cells with progress above zero.
    pub active_cells: usize,
}

impl BoardStats {
    /// Compute statistics from a cell snapshot. Pure.
    pub fn from_cells(cells: &[Cell]) -> Self {
        let center = cells.iter().find(|c| c.level == CellLevel::Center);
        let sub_centers: Vec<&Cell> = cells
            .iter()
            .filter(|c| c.level == CellLevel::SubCenter)
            .collect();

        let sub_center_mean = if sub_centers.is_empty() {
            0.0
        } else {
            sub_centers.iter().map(|c| c.progress).sum::<f32>() / sub_centers.len() as f32
        };

        let overall_progress = match center {
            Some(cell) if cell.progress > 0.0 => cell.progress,
            _ => sub_center_mean,
        };

        let total_cells = cells.len();
        let filled_cells = cells.iter().filter(|c| !c.content.is_empty()).count();
        let completion_rate = if total_cells == 0 {
            0.0
        } else {
            100.0 * filled_cells as f32 / total_cells as f32
        };
        let active_cells = cells.iter().filter(|c| c.progress > 0.0).count();

        Self {
            overall_progress,
            filled_cells,
            total_cells,
            completion_rate,
            active_cells,
        }
    }
}
