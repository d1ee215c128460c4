//! Validation and sanitization of product input.
//!
//! These functions are pure and deterministic. Validation collects
//! every applicable error so callers can display the full set;
//! sanitization coerces raw input into the canonical stored
//! representation and is idempotent.

use crate::product::{FieldPatch, FieldValue, NewProduct, ProductDraft, ProductField};

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl Validation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self { is_valid: errors.is_empty(), errors }
    }
}

fn is_blank(s: &Option<String>) -> bool {
    match s {
        Some(s) => s.trim().is_empty(),
        None => true,
    }
}

/// Validate a full product record for create/full-update.
///
/// `price` must be present and parse as a number ≥ 0 (zero is valid).
/// `in_price` and `in_stock` are optional but must be numeric when
/// supplied; negative `in_price` is rejected here as well as at field
/// level.
pub fn validate_product(draft: &ProductDraft) -> Validation {
    let mut errors = Vec::new();

    if is_blank(&draft.name) {
        errors.push("Product name is required".to_string());
    }

    match draft.price.as_f64() {
        None => errors.push("Valid price is required".to_string()),
        Some(price) if price < 0.0 => errors.push("Price cannot be negative".to_string()),
        Some(_) => {}
    }

    if draft.in_price.is_present() {
        match draft.in_price.as_f64() {
            None => errors.push("In price must be a valid number".to_string()),
            Some(in_price) if in_price < 0.0 => {
                errors.push("In price cannot be negative".to_string());
            }
            Some(_) => {}
        }
    }

    if draft.in_stock.is_present() && draft.in_stock.as_f64().is_none() {
        errors.push("In stock must be a valid number".to_string());
    }

    Validation::from_errors(errors)
}

/// Validate a single-field update.
///
/// Unknown field names are invalid for every value. `price` requires a
/// numeric value ≥ 0; `in_price` and `in_stock` require one when a
/// value is supplied.
pub fn validate_product_field(field: &str, value: &FieldValue) -> Validation {
    let mut errors = Vec::new();

    let known: Option<ProductField> = field.parse().ok();
    if known.is_none() {
        errors.push("Invalid field name".to_string());
    }

    match known {
        Some(ProductField::Price) => {
            if !value.as_f64().is_some_and(|n| n >= 0.0) {
                errors.push("Price must be a valid positive number".to_string());
            }
        }
        Some(ProductField::InPrice) if value.is_present() => {
            if !value.as_f64().is_some_and(|n| n >= 0.0) {
                errors.push("In price must be a valid positive number".to_string());
            }
        }
        Some(ProductField::InStock) if value.is_present() => {
            if !value.as_i32().is_some_and(|n| n >= 0) {
                errors.push("In stock must be a valid positive number".to_string());
            }
        }
        _ => {}
    }

    Validation::from_errors(errors)
}

fn trim_to_none(s: &Option<String>) -> Option<String> {
    s.as_deref().map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}

/// Normalize a raw draft into a complete record.
///
/// String fields are trimmed (empty becomes `None`, except `name`
/// which becomes `""`), `price` is coerced to a float defaulting to 0
/// on parse failure, and the optional numerics become `None` when
/// absent or unparseable.
pub fn sanitize_product(draft: &ProductDraft) -> NewProduct {
    NewProduct {
        article_no: trim_to_none(&draft.article_no),
        name: trim_to_none(&draft.name).unwrap_or_default(),
        name_sv: trim_to_none(&draft.name_sv),
        in_price: draft.in_price.as_f64(),
        price: draft.price.as_f64().unwrap_or(0.0),
        unit: trim_to_none(&draft.unit),
        in_stock: draft.in_stock.as_i32(),
        description: trim_to_none(&draft.description),
        description_sv: trim_to_none(&draft.description_sv),
    }
}

/// Coerce a validated single-field value to its column type.
///
/// Numeric fields parse to float/int (absent becomes null); string
/// fields are trimmed to null. Numbers supplied for text columns are
/// stringified rather than rejected.
pub fn sanitize_field(field: ProductField, value: &FieldValue) -> FieldPatch {
    match field {
        ProductField::Price | ProductField::InPrice => FieldPatch::Float(value.as_f64()),
        ProductField::InStock => FieldPatch::Int(value.as_i32()),
        ProductField::ArticleNo
        | ProductField::Name
        | ProductField::NameSv
        | ProductField::Unit
        | ProductField::Description
        | ProductField::DescriptionSv => FieldPatch::Text(match value {
            FieldValue::Text(t) => {
                let t = t.trim();
                (!t.is_empty()).then(|| t.to_string())
            }
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Null => None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: Option<&str>, price: FieldValue) -> ProductDraft {
        ProductDraft {
            name: name.map(str::to_string),
            price,
            ..ProductDraft::default()
        }
    }

    #[test]
    fn missing_name_is_reported() {
        let v = validate_product(&draft(None, FieldValue::Number(10.0)));
        assert!(!v.is_valid);
        assert!(v.errors.contains(&"Product name is required".to_string()));
    }

    #[test]
    fn blank_name_is_reported() {
        let v = validate_product(&draft(Some("   "), FieldValue::Number(10.0)));
        assert!(!v.is_valid);
        assert!(v.errors.contains(&"Product name is required".to_string()));
    }

    #[test]
    fn missing_price_is_reported() {
        let v = validate_product(&draft(Some("Hammer"), FieldValue::Null));
        assert!(!v.is_valid);
        assert!(v.errors.contains(&"Valid price is required".to_string()));
    }

    #[test]
    fn non_numeric_price_is_reported() {
        let v = validate_product(&draft(Some("Hammer"), FieldValue::from("cheap")));
        assert!(!v.is_valid);
        assert!(v.errors.contains(&"Valid price is required".to_string()));
    }

    #[test]
    fn negative_price_is_reported() {
        let v = validate_product(&draft(Some("Hammer"), FieldValue::Number(-1.0)));
        assert!(!v.is_valid);
        assert!(v.errors.contains(&"Price cannot be negative".to_string()));
    }

    #[test]
    fn zero_price_is_valid() {
        let v = validate_product(&draft(Some("Hammer"), FieldValue::Number(0.0)));
        assert!(v.is_valid, "errors: {:?}", v.errors);
    }

    #[test]
    fn all_errors_are_collected() {
        let v = validate_product(&ProductDraft {
            in_price: FieldValue::from("abc"),
            in_stock: FieldValue::from("lots"),
            ..ProductDraft::default()
        });
        assert!(!v.is_valid);
        assert_eq!(v.errors.len(), 4);
    }

    #[test]
    fn negative_in_price_is_rejected_at_record_level() {
        let v = validate_product(&ProductDraft {
            name: Some("Hammer".to_string()),
            price: FieldValue::Number(10.0),
            in_price: FieldValue::Number(-5.0),
            ..ProductDraft::default()
        });
        assert!(!v.is_valid);
        assert!(v.errors.contains(&"In price cannot be negative".to_string()));
    }

    #[test]
    fn unknown_field_is_invalid() {
        let v = validate_product_field("id", &FieldValue::Number(1.0));
        assert!(!v.is_valid);
        assert_eq!(v.errors, vec!["Invalid field name".to_string()]);
    }

    #[test]
    fn price_field_requires_non_negative_number() {
        assert!(!validate_product_field("price", &FieldValue::Null).is_valid);
        assert!(!validate_product_field("price", &FieldValue::from("abc")).is_valid);
        assert!(!validate_product_field("price", &FieldValue::Number(-2.0)).is_valid);
        assert!(validate_product_field("price", &FieldValue::Number(0.0)).is_valid);
    }

    #[test]
    fn optional_numeric_fields_allow_absence() {
        assert!(validate_product_field("in_price", &FieldValue::Null).is_valid);
        assert!(validate_product_field("in_stock", &FieldValue::Null).is_valid);
        assert!(!validate_product_field("in_price", &FieldValue::Number(-1.0)).is_valid);
        assert!(!validate_product_field("in_stock", &FieldValue::from("many")).is_valid);
    }

    #[test]
    fn sanitize_trims_and_null_fills() {
        let got = sanitize_product(&ProductDraft {
            article_no: Some("  A-1  ".to_string()),
            name: Some("  Hammer ".to_string()),
            name_sv: Some("   ".to_string()),
            price: FieldValue::from("49.90"),
            in_stock: FieldValue::from("3"),
            ..ProductDraft::default()
        });
        assert_eq!(got.article_no.as_deref(), Some("A-1"));
        assert_eq!(got.name, "Hammer");
        assert_eq!(got.name_sv, None);
        assert_eq!(got.price, 49.90);
        assert_eq!(got.in_price, None);
        assert_eq!(got.in_stock, Some(3));
        assert_eq!(got.unit, None);
    }

    #[test]
    fn sanitize_defaults_unparseable_price_to_zero() {
        let got = sanitize_product(&draft(Some("Hammer"), FieldValue::from("cheap")));
        assert_eq!(got.price, 0.0);
    }

    #[test]
    fn sanitize_field_coerces_by_column_type() {
        assert_eq!(
            sanitize_field(ProductField::Price, &FieldValue::from("12.5")),
            FieldPatch::Float(Some(12.5))
        );
        assert_eq!(sanitize_field(ProductField::InStock, &FieldValue::from("8")), FieldPatch::Int(Some(8)));
        assert_eq!(
            sanitize_field(ProductField::Unit, &FieldValue::from("  kg ")),
            FieldPatch::Text(Some("kg".to_string()))
        );
        assert_eq!(sanitize_field(ProductField::Unit, &FieldValue::from("  ")), FieldPatch::Text(None));
        assert_eq!(sanitize_field(ProductField::InPrice, &FieldValue::Null), FieldPatch::Float(None));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_field_value() -> impl Strategy<Value = FieldValue> {
            prop_oneof![
                Just(FieldValue::Null),
                (-1e9f64..1e9).prop_map(FieldValue::Number),
                "[ -~]{0,16}".prop_map(FieldValue::Text),
            ]
        }

        proptest! {
            /// Property: a blank name is always reported, whatever else
            /// the record contains.
            #[test]
            fn blank_name_always_invalid(
                blank in "[ \t]{0,8}",
                price in any_field_value(),
            ) {
                let v = validate_product(&ProductDraft {
                    name: Some(blank),
                    price,
                    ..ProductDraft::default()
                });
                prop_assert!(!v.is_valid);
                prop_assert!(v.errors.contains(&"Product name is required".to_string()));
            }

            /// Property: a non-blank name plus a non-negative price is
            /// valid regardless of the optional string fields.
            #[test]
            fn valid_name_and_price_pass(
                name in "[A-Za-z][A-Za-z0-9 ]{0,30}",
                price in 0.0f64..1e9,
                unit in proptest::option::of("[a-z]{1,8}"),
                description in proptest::option::of("[ -~]{0,40}"),
            ) {
                let v = validate_product(&ProductDraft {
                    name: Some(name),
                    price: FieldValue::Number(price),
                    unit,
                    description,
                    ..ProductDraft::default()
                });
                prop_assert!(v.is_valid, "errors: {:?}", v.errors);
            }

            /// Property: negative prices are always rejected.
            #[test]
            fn negative_price_always_invalid(
                name in "[A-Za-z]{1,10}",
                price in -1e9f64..-f64::MIN_POSITIVE,
            ) {
                let v = validate_product(&draft(Some(&name), FieldValue::Number(price)));
                prop_assert!(!v.is_valid);
            }

            /// Property: any field name outside the allow-list is
            /// invalid for every value.
            #[test]
            fn unknown_fields_always_invalid(
                field in "[a-z_]{1,20}",
                value in any_field_value(),
            ) {
                prop_assume!(field.parse::<ProductField>().is_err());
                let v = validate_product_field(&field, &value);
                prop_assert!(!v.is_valid);
            }

            /// Property: sanitization is idempotent.
            #[test]
            fn sanitize_is_idempotent(
                article_no in proptest::option::of("[ -~]{0,16}"),
                name in proptest::option::of("[ -~]{0,16}"),
                name_sv in proptest::option::of("[ -~]{0,16}"),
                in_price in any_field_value(),
                price in any_field_value(),
                unit in proptest::option::of("[ -~]{0,8}"),
                in_stock in any_field_value(),
            ) {
                let draft = ProductDraft {
                    article_no,
                    name,
                    name_sv,
                    in_price,
                    price,
                    unit,
                    in_stock,
                    ..ProductDraft::default()
                };
                let once = sanitize_product(&draft);
                let twice = sanitize_product(&ProductDraft::from(once.clone()));
                prop_assert_eq!(once, twice);
            }
        }
    }
}
