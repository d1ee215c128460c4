//! `pricelist-client` — client-side sync layer for the pricelist API.
//!
//! Maintains an in-memory product list and mediates optimistic
//! mutation: field saves rewrite local state before the server
//! confirms, and a failed save rolls back by refetching the
//! authoritative list. Reads go through a short-lived TTL cache and
//! every network call is spaced by a per-operation rate limiter.

pub mod api;
pub mod cache;
pub mod error;
pub mod format;
pub mod limit;
pub mod sync;

pub use api::{ProductsApi, Stats};
pub use cache::TtlCache;
pub use error::{ClientError, ClientResult};
pub use limit::{OpClass, RateLimiter};
pub use sync::{ProductSync, PRODUCTS_CACHE_KEY};

// Local filtering is shared with the server-side in-memory search.
pub use pricelist_core::filter_products;
