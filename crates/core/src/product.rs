use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product row as persisted. The server is the sole source of truth;
/// clients hold a transient read-through copy of these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identity; immutable once created.
    pub id: i32,
    pub article_no: Option<String>,
    pub name: String,
    /// Swedish display name.
    pub name_sv: Option<String>,
    pub in_price: Option<f64>,
    pub price: f64,
    pub unit: Option<String>,
    pub in_stock: Option<i32>,
    pub description: Option<String>,
    /// Swedish description.
    pub description_sv: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fixed set of field names permitted for single-field updates.
///
/// Anything outside this list is rejected before reaching storage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    ArticleNo,
    Name,
    NameSv,
    InPrice,
    Price,
    Unit,
    InStock,
    Description,
    DescriptionSv,
}

impl ProductField {
    pub const ALL: [ProductField; 9] = [
        ProductField::ArticleNo,
        ProductField::Name,
        ProductField::NameSv,
        ProductField::InPrice,
        ProductField::Price,
        ProductField::Unit,
        ProductField::InStock,
        ProductField::Description,
        ProductField::DescriptionSv,
    ];

    /// Column name in the `products` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::ArticleNo => "article_no",
            ProductField::Name => "name",
            ProductField::NameSv => "name_sv",
            ProductField::InPrice => "in_price",
            ProductField::Price => "price",
            ProductField::Unit => "unit",
            ProductField::InStock => "in_stock",
            ProductField::Description => "description",
            ProductField::DescriptionSv => "description_sv",
        }
    }
}

impl FromStr for ProductField {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "article_no" => Ok(ProductField::ArticleNo),
            "name" => Ok(ProductField::Name),
            "name_sv" => Ok(ProductField::NameSv),
            "in_price" => Ok(ProductField::InPrice),
            "price" => Ok(ProductField::Price),
            "unit" => Ok(ProductField::Unit),
            "in_stock" => Ok(ProductField::InStock),
            "description" => Ok(ProductField::Description),
            "description_sv" => Ok(ProductField::DescriptionSv),
            _ => Err(()),
        }
    }
}

impl core::fmt::Display for ProductField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw field value as received over the wire.
///
/// Clients send numeric fields as JSON numbers or as strings ("12.5"),
/// so validation has to be able to observe "non-numeric" rather than
/// relying on the deserializer to reject it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Whether a value was supplied at all. Blank text counts as absent
    /// for the optional numeric fields.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Number(_) => true,
            FieldValue::Text(t) => !t.is_empty(),
        }
    }

    /// Numeric interpretation, if any. Non-finite values read as
    /// non-numeric, the same way `isNaN(parseFloat(v))` treats them.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Null => None,
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(t) => t.trim().parse::<f64>().ok(),
        }
        .filter(|n| n.is_finite())
    }

    /// Integer interpretation: numeric values are truncated toward zero.
    pub fn as_i32(&self) -> Option<i32> {
        self.as_f64().map(|f| f.trunc() as i32)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// An unvalidated product record as submitted for create/full-update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub article_no: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_sv: Option<String>,
    #[serde(default)]
    pub in_price: FieldValue,
    #[serde(default)]
    pub price: FieldValue,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub in_stock: FieldValue,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_sv: Option<String>,
}

/// A sanitized, complete record ready for persistence. Every
/// allow-listed field is present; absent optionals are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub article_no: Option<String>,
    pub name: String,
    pub name_sv: Option<String>,
    pub in_price: Option<f64>,
    pub price: f64,
    pub unit: Option<String>,
    pub in_stock: Option<i32>,
    pub description: Option<String>,
    pub description_sv: Option<String>,
}

impl From<NewProduct> for ProductDraft {
    fn from(p: NewProduct) -> Self {
        ProductDraft {
            article_no: p.article_no,
            name: Some(p.name),
            name_sv: p.name_sv,
            in_price: p.in_price.map(FieldValue::Number).unwrap_or_default(),
            price: FieldValue::Number(p.price),
            unit: p.unit,
            in_stock: p.in_stock.map(|n| FieldValue::Number(n as f64)).unwrap_or_default(),
            description: p.description,
            description_sv: p.description_sv,
        }
    }
}

/// A coerced single-field replacement value, typed per column.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPatch {
    Text(Option<String>),
    Float(Option<f64>),
    Int(Option<i32>),
}

/// Search criteria for the substring search endpoint.
///
/// `article_no` matches only the article-number column; `name` matches
/// across both names and both descriptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        self.article_no.is_none() && self.name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_round_trips_through_str() {
        for field in ProductField::ALL {
            assert_eq!(field.as_str().parse::<ProductField>(), Ok(field));
        }
    }

    #[test]
    fn unknown_field_name_is_rejected() {
        assert!("id".parse::<ProductField>().is_err());
        assert!("created_at".parse::<ProductField>().is_err());
        assert!("".parse::<ProductField>().is_err());
    }

    #[test]
    fn field_value_deserializes_numbers_and_strings() {
        let n: FieldValue = serde_json::from_str("12.5").unwrap();
        assert_eq!(n, FieldValue::Number(12.5));

        let s: FieldValue = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(s.as_f64(), Some(12.5));

        let null: FieldValue = serde_json::from_str("null").unwrap();
        assert_eq!(null, FieldValue::Null);
    }

    #[test]
    fn non_numeric_text_has_no_numeric_reading() {
        assert_eq!(FieldValue::from("abc").as_f64(), None);
        assert_eq!(FieldValue::from("abc").as_i32(), None);
    }

    #[test]
    fn integer_reading_truncates() {
        assert_eq!(FieldValue::Number(12.9).as_i32(), Some(12));
        assert_eq!(FieldValue::from("7").as_i32(), Some(7));
    }

    #[test]
    fn draft_accepts_partial_json() {
        let draft: ProductDraft = serde_json::from_str(r#"{"name":"Hammer","price":"49.90"}"#).unwrap();
        assert_eq!(draft.name.as_deref(), Some("Hammer"));
        assert_eq!(draft.price.as_f64(), Some(49.90));
        assert_eq!(draft.in_price, FieldValue::Null);
    }
}
