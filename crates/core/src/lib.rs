//! `pricelist-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the product record, the editable-field allow-list, validation and
//! sanitization rules, and client-side filter matching.

pub mod error;
pub mod filter;
pub mod product;
pub mod terms;
pub mod validate;

pub use error::{Error, Result};
pub use filter::filter_products;
pub use product::{FieldPatch, FieldValue, NewProduct, Product, ProductDraft, ProductField, SearchCriteria};
pub use terms::{Lang, TermsSection};
pub use validate::{sanitize_field, sanitize_product, validate_product, validate_product_field, Validation};
