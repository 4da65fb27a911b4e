use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Semantic role of a cell within the 9x9 grid.
///
/// Stored denormalized on the row; always agrees with the topology rule for
/// the cell's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellLevel {
    Center,
    SubCenter,
    Leaf,
}

impl fmt::Display for CellLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Center => "CENTER",
            Self::SubCenter => "SUB_CENTER",
            Self::Leaf => "LEAF",
        };
        f.write_str(s)
    }
}

impl FromStr for CellLevel {
    type Err = CellLevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CENTER" => Ok(Self::Center),
            "SUB_CENTER" => Ok(Self::SubCenter),
            "LEAF" => Ok(Self::Leaf),
            other => Err(CellLevelParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`CellLevel`] string.
#[derive(Debug, Clone)]
pub struct CellLevelParseError(pub String);

impl fmt::Display for CellLevelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cell level: {:?}", self.0)
    }
}

impl std::error::Error for CellLevelParseError {}

// ---------------------------------------------------------------------------

/// Recurrence kind of an action plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanKind {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
        };
        f.write_str(s)
    }
}

impl FromStr for PlanKind {
    type Err = PlanKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DAILY" => Ok(Self::Daily),
            "WEEKLY" => Ok(Self::Weekly),
            "MONTHLY" => Ok(Self::Monthly),
            other => Err(PlanKindParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`PlanKind`] string.
#[derive(Debug, Clone)]
pub struct PlanKindParseError(pub String);

impl fmt::Display for PlanKindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid plan kind: {:?}", self.0)
    }
}

impl std::error::Error for PlanKindParseError {}

// ---------------------------------------------------------------------------

/// Status of a single dated completion log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogStatus {
    Done,
    Skip,
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Done => "DONE",
            Self::Skip => "SKIP",
        };
        f.write_str(s)
    }
}

impl FromStr for LogStatus {
    type Err = LogStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DONE" => Ok(Self::Done),
            "SKIP" => Ok(Self::Skip),
            other => Err(LogStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`LogStatus`] string.
#[derive(Debug, Clone)]
pub struct LogStatusParseError(pub String);

impl fmt::Display for LogStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid log status: {:?}", self.0)
    }
}

impl std::error::Error for LogStatusParseError {}

// ---------------------------------------------------------------------------
// Row structs
// ---------------------------------------------------------------------------

/// A board -- one user's 9x9 goal-planning grid instance.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Board {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub theme_color: String,
    pub start_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A cell -- one addressable position (0..=80) in a board.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cell {
    pub id: Uuid,
    pub board_id: Uuid,
    pub position: i32,
    pub level: CellLevel,
    pub content: String,
    pub progress: f32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A recurrence policy attached to a cell.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActionPlan {
    pub id: Uuid,
    pub cell_id: Uuid,
    pub kind: PlanKind,
    pub target_count: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single dated completion record under a plan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActionLog {
    pub id: Uuid,
    pub action_plan_id: Uuid,
    pub log_date: NaiveDate,
    pub status: LogStatus,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
