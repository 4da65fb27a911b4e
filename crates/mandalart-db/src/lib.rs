//! Persistence layer for mandalart boards.
//!
//! Wraps a PostgreSQL store with one query module per table (`boards`,
//! `cells`, `action_plans`, `action_logs`), typed row models, embedded
//! migrations, and pool/config helpers.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
