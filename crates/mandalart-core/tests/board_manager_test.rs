//! Integration tests for the board state manager.
//!
//! Cover board bootstrap (create-on-first-access), the load state machine,
//! title validation, content mirroring between linked positions, and
//! wholesale reload.

use sqlx::PgPool;
use uuid::Uuid;

use mandalart_db::models::CellLevel;
use mandalart_db::queries::{boards, cells};
use mandalart_test_utils::{create_test_db, drop_test_db};

use mandalart_core::Error;
use mandalart_core::board::{BoardManager, BoardState, DEFAULT_THEME_COLOR, DEFAULT_TITLE};
use mandalart_core::grid;
use mandalart_core::session::Session;

/// Build a ready manager for a fresh user on a fresh database.
async fn ready_manager(pool: &PgPool) -> BoardManager {
    let session = Session::authenticated(Uuid::new_v4());
    let mut manager = BoardManager::new(pool.clone(), session);
    manager
        .load_or_create()
        .await
        .expect("load_or_create should succeed");
    manager
}

#[tokio::test]
async fn first_access_creates_a_full_board() {
    let (pool, db_name) = create_test_db().await;
    let manager = ready_manager(&pool).await;

    assert_eq!(manager.state(), BoardState::Ready);

    let board = manager.board().expect("board should be loaded");
    assert_eq!(board.title, DEFAULT_TITLE);
    assert_eq!(board.theme_color, DEFAULT_THEME_COLOR);

    let loaded = manager.cells();
    assert_eq!(loaded.len(), 81);
    for (index, cell) in loaded.iter().enumerate() {
        assert_eq!(cell.position, index as i32);
        assert_eq!(cell.content, "");
        assert_eq!(cell.progress, 0.0);
        assert_eq!(
            cell.level,
            grid::classify(cell.position).expect("in range"),
            "stored level must agree with the topology rule"
        );
    }
    assert_eq!(loaded[40].level, CellLevel::Center);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn second_load_reuses_the_existing_board() {
    let (pool, db_name) = create_test_db().await;

    let user_id = Uuid::new_v4();
    let mut first = BoardManager::new(pool.clone(), Session::authenticated(user_id));
    first.load_or_create().await.expect("should succeed");
    let board_id = first.board().expect("loaded").id;

    let mut second = BoardManager::new(pool.clone(), Session::authenticated(user_id));
    second.load_or_create().await.expect("should succeed");
    assert_eq!(second.board().expect("loaded").id, board_id);
    assert_eq!(second.cells().len(), 81);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn anonymous_session_is_a_no_op() {
    let (pool, db_name) = create_test_db().await;

    let mut manager = BoardManager::new(pool.clone(), Session::anonymous());
    let result = manager.load_or_create().await;
    assert!(matches!(result, Err(Error::NotAuthenticated)));
    assert_eq!(manager.state(), BoardState::Unloaded);
    assert!(manager.board().is_none());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn operations_require_ready_state() {
    let (pool, db_name) = create_test_db().await;

    let mut manager = BoardManager::new(pool.clone(), Session::authenticated(Uuid::new_v4()));
    let result = manager.rename_board("Early").await;
    assert!(matches!(result, Err(Error::InvalidState { .. })));
    let result = manager.set_cell_content(Uuid::new_v4(), "Early").await;
    assert!(matches!(result, Err(Error::InvalidState { .. })));
    let result = manager.reload_cells().await;
    assert!(matches!(result, Err(Error::InvalidState { .. })));

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn rename_persists_and_rejects_blank_titles() {
    let (pool, db_name) = create_test_db().await;
    let mut manager = ready_manager(&pool).await;
    let board_id = manager.board().expect("loaded").id;

    manager
        .rename_board("2026 Goals")
        .await
        .expect("rename should succeed");
    assert_eq!(manager.board().expect("loaded").title, "2026 Goals");

    let stored = boards::get_board(&pool, board_id)
        .await
        .expect("fetch should succeed")
        .expect("board should exist");
    assert_eq!(stored.title, "2026 Goals");

    // Blank titles never reach the store; the prior title stands.
    let result = manager.rename_board("   ").await;
    assert!(matches!(result, Err(Error::Rejected(_))));
    assert_eq!(manager.board().expect("loaded").title, "2026 Goals");
    let stored = boards::get_board(&pool, board_id)
        .await
        .expect("fetch should succeed")
        .expect("board should exist");
    assert_eq!(stored.title, "2026 Goals");

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn editing_a_ring_cell_mirrors_to_the_sub_center() {
    let (pool, db_name) = create_test_db().await;
    let mut manager = ready_manager(&pool).await;

    let ring_id = manager.cell_at_position(31).expect("cell exists").id;
    manager
        .set_cell_content(ring_id, "X")
        .await
        .expect("edit should succeed");

    assert_eq!(manager.cell_at_position(31).expect("cell exists").content, "X");
    assert_eq!(manager.cell_at_position(13).expect("cell exists").content, "X");

    // Both writes reached the store.
    let mirror_id = manager.cell_at_position(13).expect("cell exists").id;
    for id in [ring_id, mirror_id] {
        let stored = cells::get_cell(&pool, id)
            .await
            .expect("fetch should succeed")
            .expect("cell should exist");
        assert_eq!(stored.content, "X");
    }

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn editing_a_sub_center_mirrors_back_to_the_ring() {
    let (pool, db_name) = create_test_db().await;
    let mut manager = ready_manager(&pool).await;

    let sub_center_id = manager.cell_at_position(10).expect("cell exists").id;
    manager
        .set_cell_content(sub_center_id, "Health")
        .await
        .expect("edit should succeed");

    assert_eq!(
        manager.cell_at_position(10).expect("cell exists").content,
        "Health"
    );
    assert_eq!(
        manager.cell_at_position(30).expect("cell exists").content,
        "Health"
    );

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn ring_edit_leaves_every_other_cell_untouched() {
    let (pool, db_name) = create_test_db().await;
    let mut manager = ready_manager(&pool).await;

    let ring_id = manager.cell_at_position(30).expect("cell exists").id;
    manager
        .set_cell_content(ring_id, "Health")
        .await
        .expect("edit should succeed");

    for cell in manager.cells() {
        match cell.position {
            30 | 10 => assert_eq!(cell.content, "Health"),
            _ => assert_eq!(cell.content, ""),
        }
    }

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn leaf_edit_changes_exactly_one_cell() {
    let (pool, db_name) = create_test_db().await;
    let mut manager = ready_manager(&pool).await;

    let leaf_id = manager.cell_at_position(0).expect("cell exists").id;
    manager
        .set_cell_content(leaf_id, "Morning run")
        .await
        .expect("edit should succeed");

    let changed = manager
        .cells()
        .iter()
        .filter(|c| !c.content.is_empty())
        .count();
    assert_eq!(changed, 1);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn editing_an_unknown_cell_is_not_found() {
    let (pool, db_name) = create_test_db().await;
    let mut manager = ready_manager(&pool).await;

    let result = manager.set_cell_content(Uuid::new_v4(), "X").await;
    assert!(matches!(result, Err(Error::NotFound(_))));

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn reload_replaces_state_wholesale() {
    let (pool, db_name) = create_test_db().await;
    let mut manager = ready_manager(&pool).await;

    // Another writer changes a cell behind the manager's back.
    let cell_id = manager.cell_at_position(5).expect("cell exists").id;
    cells::update_cell_content(&pool, cell_id, "From elsewhere")
        .await
        .expect("direct update should succeed");
    assert_eq!(manager.cell_at_position(5).expect("cell exists").content, "");

    manager.reload_cells().await.expect("reload should succeed");
    assert_eq!(
        manager.cell_at_position(5).expect("cell exists").content,
        "From elsewhere"
    );
    assert_eq!(manager.cells().len(), 81);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn stats_reflect_the_loaded_cells() {
    let (pool, db_name) = create_test_db().await;
    let mut manager = ready_manager(&pool).await;

    let stats = manager.stats();
    assert_eq!(stats.total_cells, 81);
    assert_eq!(stats.filled_cells, 0);

    let leaf_id = manager.cell_at_position(2).expect("cell exists").id;
    manager
        .set_cell_content(leaf_id, "Stretch")
        .await
        .expect("edit should succeed");

    let stats = manager.stats();
    assert_eq!(stats.filled_cells, 1);

    pool.close().await;
    drop_test_db(&db_name).await;
}
