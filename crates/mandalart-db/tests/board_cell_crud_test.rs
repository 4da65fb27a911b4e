//! Integration tests for board and cell CRUD operations.

use uuid::Uuid;

use mandalart_db::models::CellLevel;
use mandalart_db::queries::cells::NewCell;
use mandalart_db::queries::{boards, cells};
use mandalart_test_utils::{create_test_db, drop_test_db};

#[tokio::test]
async fn insert_and_get_board() {
    let (pool, db_name) = create_test_db().await;

    let user_id = Uuid::new_v4();
    let board = boards::insert_board(&pool, user_id, "My Goals", "#F59E0B")
        .await
        .expect("insert_board should succeed");

    assert_eq!(board.user_id, user_id);
    assert_eq!(board.title, "My Goals");
    assert_eq!(board.theme_color, "#F59E0B");
    assert!(board.start_date.is_none());

    let fetched = boards::get_board(&pool, board.id)
        .await
        .expect("get_board should succeed")
        .expect("board should exist");
    assert_eq!(fetched.id, board.id);
    assert_eq!(fetched.title, "My Goals");

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn latest_board_picks_newest() {
    let (pool, db_name) = create_test_db().await;

    let user_id = Uuid::new_v4();
    let _older = boards::insert_board(&pool, user_id, "First", "#F59E0B")
        .await
        .expect("insert should succeed");
    let newer = boards::insert_board(&pool, user_id, "Second", "#F59E0B")
        .await
        .expect("insert should succeed");

    let latest = boards::latest_board_for_user(&pool, user_id)
        .await
        .expect("query should succeed")
        .expect("a board should exist");
    assert_eq!(latest.id, newer.id);

    // A different user sees nothing.
    let none = boards::latest_board_for_user(&pool, Uuid::new_v4())
        .await
        .expect("query should succeed");
    assert!(none.is_none());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn rename_board() {
    let (pool, db_name) = create_test_db().await;

    let board = boards::insert_board(&pool, Uuid::new_v4(), "My Goals", "#F59E0B")
        .await
        .expect("insert should succeed");

    boards::update_board_title(&pool, board.id, "2026 Goals")
        .await
        .expect("update should succeed");

    let fetched = boards::get_board(&pool, board.id)
        .await
        .expect("get should succeed")
        .expect("board should exist");
    assert_eq!(fetched.title, "2026 Goals");
    assert!(fetched.updated_at >= board.updated_at);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn rename_missing_board_fails() {
    let (pool, db_name) = create_test_db().await;

    let result = boards::update_board_title(&pool, Uuid::new_v4(), "Nope").await;
    assert!(result.is_err());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn insert_cell_batch_and_list() {
    let (pool, db_name) = create_test_db().await;

    let board = boards::insert_board(&pool, Uuid::new_v4(), "My Goals", "#F59E0B")
        .await
        .expect("insert should succeed");

    let template: Vec<NewCell> = (0..81)
        .map(|position| NewCell {
            position,
            level: if position == 40 {
                CellLevel::Center
            } else if [10, 13, 16, 37, 43, 64, 67, 70].contains(&position) {
                CellLevel::SubCenter
            } else {
                CellLevel::Leaf
            },
        })
        .collect();

    let inserted = cells::insert_board_cells(&pool, board.id, &template)
        .await
        .expect("batch insert should succeed");
    assert_eq!(inserted.len(), 81);

    let listed = cells::list_cells_for_board(&pool, board.id)
        .await
        .expect("list should succeed");
    assert_eq!(listed.len(), 81);
    for (index, cell) in listed.iter().enumerate() {
        assert_eq!(cell.position, index as i32);
        assert_eq!(cell.content, "");
        assert_eq!(cell.progress, 0.0);
    }
    assert_eq!(listed[40].level, CellLevel::Center);
    assert_eq!(listed[10].level, CellLevel::SubCenter);
    assert_eq!(listed[0].level, CellLevel::Leaf);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn batch_insert_rolls_back_on_failure() {
    let (pool, db_name) = create_test_db().await;

    let board = boards::insert_board(&pool, Uuid::new_v4(), "My Goals", "#F59E0B")
        .await
        .expect("insert should succeed");

    // Second row is out of range, so the whole batch must roll back.
    let template = [
        NewCell {
            position: 0,
            level: CellLevel::Leaf,
        },
        NewCell {
            position: 81,
            level: CellLevel::Leaf,
        },
    ];
    let result = cells::insert_board_cells(&pool, board.id, &template).await;
    assert!(result.is_err());

    let listed = cells::list_cells_for_board(&pool, board.id)
        .await
        .expect("list should succeed");
    assert!(listed.is_empty());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn update_cell_content_and_progress() {
    let (pool, db_name) = create_test_db().await;

    let board = boards::insert_board(&pool, Uuid::new_v4(), "My Goals", "#F59E0B")
        .await
        .expect("insert should succeed");
    let inserted = cells::insert_board_cells(
        &pool,
        board.id,
        &[NewCell {
            position: 0,
            level: CellLevel::Leaf,
        }],
    )
    .await
    .expect("insert should succeed");
    let cell_id = inserted[0].id;

    cells::update_cell_content(&pool, cell_id, "Morning run")
        .await
        .expect("content update should succeed");
    cells::update_cell_progress(&pool, cell_id, 50.0)
        .await
        .expect("progress update should succeed");

    let fetched = cells::get_cell(&pool, cell_id)
        .await
        .expect("get should succeed")
        .expect("cell should exist");
    assert_eq!(fetched.content, "Morning run");
    assert_eq!(fetched.progress, 50.0);

    // Updates against unknown cells fail loudly.
    assert!(
        cells::update_cell_content(&pool, Uuid::new_v4(), "x")
            .await
            .is_err()
    );
    assert!(
        cells::update_cell_progress(&pool, Uuid::new_v4(), 1.0)
            .await
            .is_err()
    );

    pool.close().await;
    drop_test_db(&db_name).await;
}
