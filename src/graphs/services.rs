use std::collections::BTreeMap;

use serde::Serialize;

use super::repo::{AmountRow, GraphRow};
use crate::validation::year_month;

const SUMMARY_WINDOW_MONTHS: usize = 12;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Breakdown {
    pub months: Vec<String>,
    pub category_totals: BTreeMap<String, f64>,
    pub subcategory_totals: BTreeMap<String, BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthSummary {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Group absolute spend by top-level category and by leaf underneath it.
///
/// A row's top category is its parent's name when the category has one, so
/// subcategory spend rolls up into the parent bucket while the per-leaf
/// breakdown is preserved in `subcategory_totals`. Rows with a non-numeric
/// amount or an unparseable date are skipped. The filter only narrows the set
/// when it names a month actually present in the data; `"all"` and `None`
/// leave it untouched.
pub fn monthly_breakdown(rows: &[GraphRow], month_filter: Option<&str>) -> Breakdown {
    struct Item<'a> {
        month: String,
        amount: f64,
        top: &'a str,
        leaf: &'a str,
    }

    // Months come from every dated row, before amounts are screened: a month
    // whose only rows carry unparseable amounts is still listed.
    let mut months: Vec<String> = rows
        .iter()
        .filter_map(|row| row.transaction_date.as_deref().and_then(year_month))
        .collect();
    months.sort();
    months.dedup();
    months.reverse();

    let items: Vec<Item<'_>> = rows
        .iter()
        .filter_map(|row| {
            let amount = row.amount.as_deref()?.trim().parse::<f64>().ok()?.abs();
            let month = year_month(row.transaction_date.as_deref()?)?;
            let leaf = row.category_name.as_deref()?;
            let top = row.parent_name.as_deref().unwrap_or(leaf);
            Some(Item {
                month,
                amount,
                top,
                leaf,
            })
        })
        .collect();

    let selected: Vec<&Item<'_>> = match month_filter {
        Some(filter) if filter != "all" && months.iter().any(|m| m == filter) => {
            items.iter().filter(|i| i.month == filter).collect()
        }
        _ => items.iter().collect(),
    };

    let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut subcategory_totals: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for item in selected {
        *category_totals.entry(item.top.to_string()).or_default() += item.amount;
        *subcategory_totals
            .entry(item.top.to_string())
            .or_default()
            .entry(item.leaf.to_string())
            .or_default() += item.amount;
    }
    for total in category_totals.values_mut() {
        *total = round2(*total);
    }
    for subtotals in subcategory_totals.values_mut() {
        for total in subtotals.values_mut() {
            *total = round2(*total);
        }
    }

    Breakdown {
        months,
        category_totals,
        subcategory_totals,
    }
}

/// Income and expense totals per calendar month, trailing 12 months in
/// ascending order. Income sums the positive amounts, expenses the negative
/// ones (sign kept). Rows with unparseable dates or amounts are excluded.
pub fn income_expense_summary(rows: &[AmountRow]) -> Vec<MonthSummary> {
    let mut by_month: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for row in rows {
        let Some(amount) = row
            .amount
            .as_deref()
            .and_then(|a| a.trim().parse::<f64>().ok())
        else {
            continue;
        };
        let Some(month) = row.transaction_date.as_deref().and_then(year_month) else {
            continue;
        };
        let entry = by_month.entry(month).or_default();
        if amount > 0.0 {
            entry.0 += amount;
        } else if amount < 0.0 {
            entry.1 += amount;
        }
    }

    let summaries: Vec<MonthSummary> = by_month
        .into_iter()
        .map(|(month, (income, expenses))| MonthSummary {
            month,
            income,
            expenses,
        })
        .collect();
    let start = summaries.len().saturating_sub(SUMMARY_WINDOW_MONTHS);
    summaries[start..].to_vec()
}

/// Distinct "YYYY-MM" buckets present in the data, newest first.
pub fn available_months(rows: &[AmountRow]) -> Vec<String> {
    let mut months: Vec<String> = rows
        .iter()
        .filter_map(|row| row.transaction_date.as_deref().and_then(year_month))
        .collect();
    months.sort();
    months.dedup();
    months.reverse();
    months
}
