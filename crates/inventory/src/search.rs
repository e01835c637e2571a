//! Name search over a listing.

use crate::item::StockItem;

/// Keep the items whose name contains `term`, ignoring case.
///
/// Input order is preserved; an empty term keeps everything.
pub fn filter_by_term(items: Vec<StockItem>, term: &str) -> Vec<StockItem> {
    items
        .into_iter()
        .filter(|item| item.name().matches_term(term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pantry_core::ItemName;
    use proptest::prelude::*;

    fn item(name: &str) -> StockItem {
        StockItem::restore(ItemName::parse(name).unwrap(), 1, None, Utc::now())
    }

    #[test]
    fn matches_substrings_case_insensitively() {
        let items = vec![item("Apple"), item("pineapple"), item("Banana")];
        let found = filter_by_term(items, "APPLE");
        let names: Vec<&str> = found.iter().map(|i| i.name().as_str()).collect();
        assert_eq!(names, vec!["Apple", "pineapple"]);
    }

    #[test]
    fn empty_term_returns_everything() {
        let items = vec![item("Apple"), item("Banana")];
        assert_eq!(filter_by_term(items.clone(), ""), items);
    }

    proptest! {
        /// Property: the result is exactly the order-preserving subset whose
        /// lowercased name contains the lowercased term.
        #[test]
        fn result_is_ordered_subset(
            names in prop::collection::btree_set("[A-Za-z]{1,8}", 0..20),
            term in "[A-Za-z]{0,3}"
        ) {
            let items: Vec<StockItem> = names.iter().map(|n| item(n)).collect();
            let expected: Vec<StockItem> = items
                .iter()
                .filter(|i| i.name().as_str().to_lowercase().contains(&term.to_lowercase()))
                .cloned()
                .collect();
            prop_assert_eq!(filter_by_term(items, &term), expected);
        }
    }
}
