use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AddTransactionRequest {
    pub account_type: String,
    pub transaction_date: String,
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub category: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AssignCategoryRequest {
    pub category_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDescriptionRequest {
    pub description: String,
}
