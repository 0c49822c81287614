use serde::{Deserialize, Serialize};

/// Top-level node of the two-level category tree.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryNode {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub subcategories: Vec<Subcategory>,
}

/// Attached child: carries no further nesting.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Subcategory {
    pub id: i64,
    pub name: String,
    pub parent_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AddCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RenameCategoryRequest {
    pub new_name: String,
}
