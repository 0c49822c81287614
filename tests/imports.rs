mod common;

use common::test_pool;
use fintrack::imports::services::{ingest, validate};
use fintrack::transactions::repo as transactions;

const HEADER: &str =
    "Account Type,Account Number,Transaction Date,Cheque Number,Description 1,Description 2,CAD$,USD$";

fn statement(rows: &[&str]) -> String {
    let mut csv = String::from(HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    csv.push('\n');
    csv
}

#[tokio::test]
async fn import_inserts_rows_with_default_category() {
    let pool = test_pool().await;
    let csv = statement(&[
        "Chequing,1234,01/15/2024,,WALMART,,-45.20,0.00",
        "Chequing,1234,01/16/2024,,IDP PURCHASE - 001,STORE A,-12.00,0.00",
    ]);

    let inserted = ingest(&pool, &csv).await.unwrap();
    assert_eq!(inserted, 2);

    let rows = transactions::list_all(&pool).await.unwrap();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.category, Some(1));
        assert_eq!(row.category_name.as_deref(), Some("Uncategorized"));
    }
    // MM/DD/YYYY converted to the stored YYYY-MM-DD form.
    assert!(rows
        .iter()
        .any(|r| r.transaction_date.as_deref() == Some("2024-01-15")));
    // IDP PURCHASE keeps only the merchant field.
    assert!(rows
        .iter()
        .any(|r| r.description.as_deref() == Some("STORE A")));
}

#[tokio::test]
async fn import_is_idempotent() {
    let pool = test_pool().await;
    let csv = statement(&[
        "Chequing,1234,01/15/2024,,WALMART,,-45.20,0.00",
        "Chequing,1234,01/31/2024,,PAYROLL DEPOSIT,ACME CORP,2500.00,0.00",
    ]);

    assert_eq!(ingest(&pool, &csv).await.unwrap(), 2);
    assert_eq!(ingest(&pool, &csv).await.unwrap(), 0);
    assert_eq!(transactions::list_all(&pool).await.unwrap().len(), 2);
}

#[tokio::test]
async fn import_skips_only_exact_tuple_duplicates() {
    let pool = test_pool().await;
    let first = statement(&["Chequing,1234,01/15/2024,,WALMART,,-45.20,0.00"]);
    assert_eq!(ingest(&pool, &first).await.unwrap(), 1);

    // Same merchant and date, different amount: not a duplicate.
    let second = statement(&[
        "Chequing,1234,01/15/2024,,WALMART,,-45.20,0.00",
        "Chequing,1234,01/15/2024,,WALMART,,-9.99,0.00",
    ]);
    assert_eq!(ingest(&pool, &second).await.unwrap(), 1);
}

#[tokio::test]
async fn malformed_statement_writes_nothing() {
    let pool = test_pool().await;
    let csv = statement(&[
        "Chequing,1234,01/15/2024,,WALMART,,-45.20,0.00",
        "Chequing,1234,bad-date,,WALMART,,-45.20,0.00",
    ]);

    assert!(ingest(&pool, &csv).await.is_err());
    assert!(transactions::list_all(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn validate_alone_never_writes() {
    let pool = test_pool().await;
    let csv = statement(&["Chequing,1234,01/15/2024,,WALMART,,-45.20,0.00"]);
    validate(&csv).unwrap();
    assert!(transactions::list_all(&pool).await.unwrap().is_empty());
}
