use super::dto::{CategoryNode, Subcategory};
use super::repo::Category;

/// Build the two-level tree from the flat category rows.
///
/// First pass collects every top-level row; second pass attaches children to
/// their parent's subcategory list. A child whose parent id is missing from
/// the set is dropped from the tree rather than raised as an error.
pub fn build_hierarchy(categories: &[Category]) -> Vec<CategoryNode> {
    let mut tree: Vec<CategoryNode> = categories
        .iter()
        .filter(|c| c.parent_id.is_none())
        .map(|c| CategoryNode {
            id: c.id,
            name: c.name.clone(),
            parent_id: None,
            subcategories: Vec::new(),
        })
        .collect();

    for child in categories.iter().filter(|c| c.parent_id.is_some()) {
        let parent_id = child.parent_id.unwrap();
        if let Some(parent) = tree.iter_mut().find(|n| n.id == parent_id) {
            parent.subcategories.push(Subcategory {
                id: child.id,
                name: child.name.clone(),
                parent_id,
            });
        }
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: i64, name: &str, parent_id: Option<i64>) -> Category {
        Category {
            id,
            name: name.to_string(),
            parent_id,
            include_in_budget: true,
        }
    }

    #[test]
    fn tops_once_and_children_under_parent() {
        let cats = vec![
            cat(1, "Uncategorized", None),
            cat(2, "Groceries", None),
            cat(3, "Produce", Some(2)),
            cat(4, "Snacks", Some(2)),
            cat(5, "Rent", None),
        ];
        let tree = build_hierarchy(&cats);
        assert_eq!(tree.len(), 3);
        let groceries = tree.iter().find(|n| n.id == 2).unwrap();
        assert_eq!(
            groceries
                .subcategories
                .iter()
                .map(|s| s.id)
                .collect::<Vec<_>>(),
            vec![3, 4]
        );
        assert!(tree.iter().filter(|n| n.id == 2).count() == 1);
    }

    #[test]
    fn dangling_parent_is_dropped() {
        let cats = vec![cat(1, "Groceries", None), cat(2, "Orphan", Some(99))];
        let tree = build_hierarchy(&cats);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].subcategories.is_empty());
    }

    #[test]
    fn children_carry_no_nested_list() {
        let cats = vec![cat(1, "Top", None), cat(2, "Child", Some(1))];
        let tree = build_hierarchy(&cats);
        assert_eq!(
            tree[0].subcategories,
            vec![Subcategory {
                id: 2,
                name: "Child".to_string(),
                parent_id: 1
            }]
        );
    }
}
