//! Client-side product filtering.
//!
//! Pure, synchronous re-filtering of an already-fetched list, so the UI
//! can narrow results without a server round trip. Matching semantics
//! mirror the server-side search: case-insensitive substring, article
//! number against its own column only, the free-text query OR-ed across
//! both names and both descriptions.

use crate::product::Product;

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn opt_contains_ci(haystack: &Option<String>, needle_lower: &str) -> bool {
    haystack.as_deref().is_some_and(|h| contains_ci(h, needle_lower))
}

/// Whether a product matches the given queries. Blank queries match
/// everything.
pub fn matches(product: &Product, article_no_query: &str, name_query: &str) -> bool {
    let article_no_query = article_no_query.trim();
    if !article_no_query.is_empty()
        && !opt_contains_ci(&product.article_no, &article_no_query.to_lowercase())
    {
        return false;
    }

    let name_query = name_query.trim();
    if !name_query.is_empty() {
        let q = name_query.to_lowercase();
        return contains_ci(&product.name, &q)
            || opt_contains_ci(&product.name_sv, &q)
            || opt_contains_ci(&product.description, &q)
            || opt_contains_ci(&product.description_sv, &q);
    }

    true
}

/// Filter a product list by article number and free-text queries.
pub fn filter_products(products: &[Product], article_no_query: &str, name_query: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|p| matches(p, article_no_query, name_query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(article_no: Option<&str>, name: &str, name_sv: Option<&str>, description: Option<&str>) -> Product {
        Product {
            id: 1,
            article_no: article_no.map(str::to_string),
            name: name.to_string(),
            name_sv: name_sv.map(str::to_string),
            in_price: None,
            price: 0.0,
            unit: None,
            in_stock: None,
            description: description.map(str::to_string),
            description_sv: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn blank_queries_match_everything() {
        let items = vec![product(None, "Hammer", None, None)];
        assert_eq!(filter_products(&items, "", "").len(), 1);
        assert_eq!(filter_products(&items, "  ", "  ").len(), 1);
    }

    #[test]
    fn article_no_query_is_scoped_to_article_no() {
        let items = vec![
            product(Some("A-100"), "Hammer", None, None),
            product(Some("B-200"), "A-100 lookalike", None, None),
        ];
        let got = filter_products(&items, "a-100", "");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].article_no.as_deref(), Some("A-100"));
    }

    #[test]
    fn name_query_ors_across_bilingual_fields() {
        let items = vec![
            product(None, "Hammer", Some("Hammare"), None),
            product(None, "Saw", None, Some("A fine hammering tool")),
            product(None, "Drill", None, None),
        ];
        // Matches "Hammer" by name, "Hammare" would too, and the saw by description.
        assert_eq!(filter_products(&items, "", "hammar").len(), 1);
        assert_eq!(filter_products(&items, "", "hammer").len(), 2);
        assert_eq!(filter_products(&items, "", "drill").len(), 1);
    }

    #[test]
    fn swedish_only_match_is_returned() {
        let items = vec![product(None, "Hammer", Some("Slägga"), None)];
        assert_eq!(filter_products(&items, "", "slägga").len(), 1);
    }

    #[test]
    fn both_queries_must_match() {
        let items = vec![
            product(Some("A-100"), "Hammer", None, None),
            product(Some("B-200"), "Hammer", None, None),
        ];
        let got = filter_products(&items, "b-", "hammer");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].article_no.as_deref(), Some("B-200"));
    }

    #[test]
    fn missing_article_no_never_matches_an_article_query() {
        let items = vec![product(None, "Hammer", None, None)];
        assert!(filter_products(&items, "a", "").is_empty());
    }
}
