mod common;

use common::{seed_transaction, test_pool};
use fintrack::budgets::repo as budgets;
use fintrack::categories::repo as categories;
use fintrack::transactions::repo as transactions;

#[tokio::test]
async fn category_crud_roundtrip() {
    let pool = test_pool().await;

    let groceries = categories::insert(&pool, "Groceries", None).await.unwrap();
    assert!(groceries.include_in_budget);

    categories::rename(&pool, groceries.id, "Food").await.unwrap();
    let renamed = categories::get(&pool, groceries.id).await.unwrap().unwrap();
    assert_eq!(renamed.name, "Food");

    categories::toggle_include_in_budget(&pool, groceries.id)
        .await
        .unwrap();
    let toggled = categories::get(&pool, groceries.id).await.unwrap().unwrap();
    assert!(!toggled.include_in_budget);

    categories::delete(&pool, groceries.id).await.unwrap();
    assert!(!categories::exists(&pool, groceries.id).await.unwrap());
}

#[tokio::test]
async fn deleting_category_removes_its_budget_row() {
    let pool = test_pool().await;
    let cat = categories::insert(&pool, "Rent", None).await.unwrap();
    budgets::upsert(&pool, cat.id, 1200.0).await.unwrap();

    categories::delete(&pool, cat.id).await.unwrap();

    let remaining = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM budgets WHERE category_id = ?",
    )
    .bind(cat.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn has_children_reflects_subcategories() {
    let pool = test_pool().await;
    let parent = categories::insert(&pool, "Groceries", None).await.unwrap();
    assert!(!categories::has_children(&pool, parent.id).await.unwrap());

    categories::insert(&pool, "Produce", Some(parent.id))
        .await
        .unwrap();
    assert!(categories::has_children(&pool, parent.id).await.unwrap());
}

#[tokio::test]
async fn transaction_lifecycle() {
    let pool = test_pool().await;
    let id = seed_transaction(&pool, "2024-01-05", "WALMART", "-45.20", 1).await;

    assert!(transactions::exists(&pool, id).await.unwrap());
    let fetched = transactions::get(&pool, id).await.unwrap().unwrap();
    assert_eq!(fetched.description.as_deref(), Some("WALMART"));
    assert_eq!(fetched.category_name.as_deref(), Some("Uncategorized"));

    transactions::update_description(&pool, id, "WALMART SUPERCENTRE")
        .await
        .unwrap();
    let updated = transactions::get(&pool, id).await.unwrap().unwrap();
    assert_eq!(updated.description.as_deref(), Some("WALMART SUPERCENTRE"));

    transactions::delete(&pool, id).await.unwrap();
    assert!(!transactions::exists(&pool, id).await.unwrap());
}

#[tokio::test]
async fn clear_all_empties_the_ledger() {
    let pool = test_pool().await;
    seed_transaction(&pool, "2024-01-05", "A", "-1", 1).await;
    seed_transaction(&pool, "2024-02-05", "B", "-2", 1).await;

    transactions::clear_all(&pool).await.unwrap();
    assert!(transactions::list_all(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn months_are_distinct_descending_and_skip_bad_dates() {
    let pool = test_pool().await;
    seed_transaction(&pool, "2024-01-05", "A", "-1", 1).await;
    seed_transaction(&pool, "2024-01-20", "B", "-2", 1).await;
    seed_transaction(&pool, "2024-03-01", "C", "-3", 1).await;
    seed_transaction(&pool, "not-a-date", "D", "-4", 1).await;

    let months = transactions::months(&pool).await.unwrap();
    assert_eq!(months, vec!["2024-03", "2024-01"]);
}

#[tokio::test]
async fn most_recent_month_tracks_the_latest_date() {
    let pool = test_pool().await;
    assert_eq!(transactions::most_recent_month(&pool).await.unwrap(), None);

    seed_transaction(&pool, "2024-01-05", "A", "-1", 1).await;
    seed_transaction(&pool, "2024-03-01", "B", "-2", 1).await;
    let recent = transactions::most_recent_month(&pool).await.unwrap();
    assert_eq!(recent.as_deref(), Some("2024-03"));
}

#[tokio::test]
async fn budget_upsert_keeps_one_row_per_category() {
    let pool = test_pool().await;
    let cat = categories::insert(&pool, "Rent", None).await.unwrap();

    budgets::upsert(&pool, cat.id, 1000.0).await.unwrap();
    budgets::upsert(&pool, cat.id, 1250.0).await.unwrap();

    let rows = sqlx::query_as::<_, (i64, f64)>(
        "SELECT category_id, amount FROM budgets WHERE category_id = ?",
    )
    .bind(cat.id)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(rows, vec![(cat.id, 1250.0)]);
}

#[tokio::test]
async fn budget_status_sums_absolute_spend_for_the_month() {
    let pool = test_pool().await;
    let groceries = categories::insert(&pool, "Groceries", None).await.unwrap();
    budgets::upsert(&pool, groceries.id, 400.0).await.unwrap();

    seed_transaction(&pool, "2024-01-05", "A", "-45.20", groceries.id).await;
    seed_transaction(&pool, "2024-01-20", "B", "-54.80", groceries.id).await;
    // Different month: must not count.
    seed_transaction(&pool, "2024-02-01", "C", "-99", groceries.id).await;

    let status = budgets::status(&pool, "2024-01").await.unwrap();
    let line = status
        .iter()
        .find(|s| s.category_id == groceries.id)
        .unwrap();
    assert_eq!(line.budget, 400.0);
    assert!((line.spent - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn budget_status_defaults_to_zero_without_a_budget_row() {
    let pool = test_pool().await;
    let cat = categories::insert(&pool, "Misc", None).await.unwrap();
    let status = budgets::status(&pool, "2024-01").await.unwrap();
    let line = status.iter().find(|s| s.category_id == cat.id).unwrap();
    assert_eq!(line.budget, 0.0);
    assert_eq!(line.spent, 0.0);
}

#[tokio::test]
async fn budget_status_honors_effective_include_flag() {
    let pool = test_pool().await;
    // Excluded top category: itself and its child disappear from the status.
    let fun = categories::insert(&pool, "Fun", None).await.unwrap();
    categories::toggle_include_in_budget(&pool, fun.id).await.unwrap();
    let games = categories::insert(&pool, "Games", Some(fun.id)).await.unwrap();

    // Child of an included parent is included even with its own flag off.
    let groceries = categories::insert(&pool, "Groceries", None).await.unwrap();
    let produce = categories::insert(&pool, "Produce", Some(groceries.id))
        .await
        .unwrap();
    categories::toggle_include_in_budget(&pool, produce.id)
        .await
        .unwrap();

    let status = budgets::status(&pool, "2024-01").await.unwrap();
    let ids: Vec<i64> = status.iter().map(|s| s.category_id).collect();
    assert!(!ids.contains(&fun.id));
    assert!(!ids.contains(&games.id));
    assert!(ids.contains(&groceries.id));
    assert!(ids.contains(&produce.id));
}

#[tokio::test]
async fn budget_status_does_not_roll_child_spend_into_parent() {
    let pool = test_pool().await;
    let groceries = categories::insert(&pool, "Groceries", None).await.unwrap();
    let produce = categories::insert(&pool, "Produce", Some(groceries.id))
        .await
        .unwrap();
    seed_transaction(&pool, "2024-01-05", "A", "-30", produce.id).await;

    let status = budgets::status(&pool, "2024-01").await.unwrap();
    let parent = status
        .iter()
        .find(|s| s.category_id == groceries.id)
        .unwrap();
    let child = status.iter().find(|s| s.category_id == produce.id).unwrap();
    assert_eq!(parent.spent, 0.0);
    assert!((child.spent - 30.0).abs() < 1e-9);
}
