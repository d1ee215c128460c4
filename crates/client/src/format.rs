//! Display helpers for rendering product fields.

use pricelist_core::{Lang, Product};

/// Two-decimal price string; absent or zero renders as "-".
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p != 0.0 => format!("{p:.2}"),
        _ => "-".to_string(),
    }
}

/// Localized display name: the Swedish name when the locale is Swedish
/// and one is set, the English name otherwise.
pub fn display_name(product: &Product, lang: Lang) -> &str {
    match (lang, product.name_sv.as_deref()) {
        (Lang::Sv, Some(name_sv)) => name_sv,
        _ => &product.name,
    }
}

/// Localized description with the same fallback rule as the name.
pub fn display_description(product: &Product, lang: Lang) -> Option<&str> {
    match (lang, product.description_sv.as_deref()) {
        (Lang::Sv, Some(description_sv)) => Some(description_sv),
        _ => product.description.as_deref(),
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Cut long text at `max_length` characters with an ellipsis.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_length).collect();
    truncated + "..."
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(name: &str, name_sv: Option<&str>) -> Product {
        Product {
            id: 1,
            article_no: None,
            name: name.to_string(),
            name_sv: name_sv.map(str::to_string),
            in_price: None,
            price: 0.0,
            unit: None,
            in_stock: None,
            description: Some("A tool".to_string()),
            description_sv: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn prices_render_with_two_decimals() {
        assert_eq!(format_price(Some(49.9)), "49.90");
        assert_eq!(format_price(Some(10.0)), "10.00");
        assert_eq!(format_price(None), "-");
        assert_eq!(format_price(Some(0.0)), "-");
    }

    #[test]
    fn swedish_locale_prefers_swedish_fields_when_present() {
        let p = product("Hammer", Some("Hammare"));
        assert_eq!(display_name(&p, Lang::Sv), "Hammare");
        assert_eq!(display_name(&p, Lang::En), "Hammer");

        let p = product("Hammer", None);
        assert_eq!(display_name(&p, Lang::Sv), "Hammer");
        // Missing Swedish description falls back to English.
        assert_eq!(display_description(&p, Lang::Sv), Some("A tool"));
    }

    #[test]
    fn truncation_keeps_short_text_intact() {
        assert_eq!(truncate_text("short", 50), "short");
        assert_eq!(truncate_text("abcdefgh", 5), "abcde...");
    }

    #[test]
    fn capitalize_handles_empty_input() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("hammer"), "Hammer");
    }
}
