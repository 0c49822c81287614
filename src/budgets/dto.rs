use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateBudgetRequest {
    pub category_id: i64,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct BudgetQuery {
    #[serde(default)]
    pub month: Option<String>,
}
