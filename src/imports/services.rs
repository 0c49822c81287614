use std::collections::HashSet;

use sqlx::SqlitePool;
use tracing::info;

use crate::error::AppError;
use crate::transactions::repo::{self, TransactionKey};
use crate::validation::{parse_mdy_date, validate_mdy_date, validate_number, ISO_DATE};

/// Header the bank statement must carry, in this exact order.
pub const EXPECTED_HEADER: [&str; 8] = [
    "Account Type",
    "Account Number",
    "Transaction Date",
    "Cheque Number",
    "Description 1",
    "Description 2",
    "CAD$",
    "USD$",
];

const DATE_FIELD: usize = 2;
const DEFAULT_CATEGORY: i64 = 1;

/// Pre-import check: exact header, uniform row width, a real MM/DD/YYYY date
/// and a numeric USD$ field in every row. The first violation fails the whole
/// file; nothing is written.
pub fn validate(csv_text: &str) -> Result<(), AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| AppError::BadRequest("Invalid CSV format".into()))?;
    if headers.iter().collect::<Vec<_>>() != EXPECTED_HEADER {
        return Err(AppError::BadRequest("Invalid CSV format".into()));
    }

    for record in reader.records() {
        let record = record.map_err(|_| AppError::BadRequest("Malformed CSV data".into()))?;
        if record.len() != EXPECTED_HEADER.len() {
            return Err(AppError::BadRequest("Malformed CSV data".into()));
        }
        let date = record.get(DATE_FIELD).unwrap_or_default();
        let usd = record.get(EXPECTED_HEADER.len() - 1).unwrap_or_default();
        if !validate_mdy_date(date) || !validate_number(usd) {
            return Err(AppError::BadRequest("Invalid data in CSV".into()));
        }
    }
    Ok(())
}

/// Description preference, evaluated in order: point-of-sale purchases carry
/// the merchant in the second field; payment/deposit rows concatenate both;
/// everything else keeps the first field.
pub fn choose_description(desc1: &str, desc2: &str) -> String {
    if desc1.contains("IDP PURCHASE") {
        desc2.to_string()
    } else if ["MISC PAYMENT", "BILL PAYMENT", "PAYROLL DEPOSIT"]
        .iter()
        .any(|term| desc1.contains(term))
    {
        format!("{} {}", desc1, desc2).trim().to_string()
    } else {
        desc1.to_string()
    }
}

/// Parse, dedup against existing rows and bulk-insert the remainder with the
/// default category. Returns the number of rows actually inserted.
///
/// Rows are inserted inside one store transaction, so a failure mid-batch
/// leaves nothing behind. Importing the same file twice inserts zero rows the
/// second time.
pub async fn ingest(db: &SqlitePool, csv_text: &str) -> Result<usize, AppError> {
    validate(csv_text)?;

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let mut candidates: Vec<TransactionKey> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|_| AppError::BadRequest("Malformed CSV data".into()))?;
        let date = parse_mdy_date(record.get(DATE_FIELD).unwrap_or_default())
            .ok_or_else(|| AppError::BadRequest("Invalid data in CSV".into()))?;
        let transaction_date = date
            .format(&ISO_DATE)
            .map_err(|_| AppError::BadRequest("Invalid data in CSV".into()))?;
        let description = choose_description(
            record.get(4).unwrap_or_default(),
            record.get(5).unwrap_or_default(),
        );
        candidates.push(TransactionKey {
            account_type: record.get(0).unwrap_or_default().trim().to_string(),
            transaction_date,
            description,
            amount: record.get(6).unwrap_or_default().trim().to_string(),
        });
    }

    let existing: HashSet<TransactionKey> =
        repo::existing_keys(db).await?.into_iter().collect();
    let new_rows: Vec<TransactionKey> = candidates
        .into_iter()
        .filter(|row| !existing.contains(row))
        .collect();

    let inserted = new_rows.len();
    if inserted > 0 {
        let mut tx = db.begin().await?;
        for row in &new_rows {
            sqlx::query(
                r#"
                INSERT INTO transactions
                    (account_type, transaction_date, description, amount, category)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&row.account_type)
            .bind(&row.transaction_date)
            .bind(&row.description)
            .bind(&row.amount)
            .bind(DEFAULT_CATEGORY)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
    }
    info!(inserted, "statement imported");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Account Type,Account Number,Transaction Date,Cheque Number,Description 1,Description 2,CAD$,USD$";

    #[test]
    fn idp_purchase_uses_second_description() {
        assert_eq!(choose_description("IDP PURCHASE XYZ", "STORE A"), "STORE A");
    }

    #[test]
    fn payroll_deposit_concatenates() {
        assert_eq!(
            choose_description("PAYROLL DEPOSIT", "ACME CORP"),
            "PAYROLL DEPOSIT ACME CORP"
        );
    }

    #[test]
    fn plain_rows_keep_first_description() {
        assert_eq!(choose_description("WALMART", ""), "WALMART");
    }

    #[test]
    fn validate_accepts_well_formed_statement() {
        let csv = format!("{}\nChequing,1234,01/15/2024,,WALMART,,-45.20,0.00\n", HEADER);
        assert!(validate(&csv).is_ok());
    }

    #[test]
    fn validate_rejects_reordered_header() {
        let csv = "Account Number,Account Type,Transaction Date,Cheque Number,Description 1,Description 2,CAD$,USD$\n";
        assert!(validate(csv).is_err());
    }

    #[test]
    fn validate_rejects_extra_column() {
        let csv = format!("{},Extra\n", HEADER);
        assert!(validate(&csv).is_err());
    }

    #[test]
    fn validate_rejects_bad_date() {
        let csv = format!("{}\nChequing,1234,2024-01-15,,WALMART,,-45.20,0.00\n", HEADER);
        assert!(validate(&csv).is_err());
    }

    #[test]
    fn validate_rejects_non_numeric_usd() {
        let csv = format!("{}\nChequing,1234,01/15/2024,,WALMART,,-45.20,abc\n", HEADER);
        assert!(validate(&csv).is_err());
    }
}
