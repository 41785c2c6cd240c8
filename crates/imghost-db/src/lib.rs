//! Metadata store for uploaded images.
//!
//! The store is a capability with two implementations selected at
//! construction time: `PgImageStore` backed by Postgres, and
//! `DisabledImageStore` for deployments without a database. Call sites
//! hold an `Arc<dyn ImageStore>` and never branch on whether the store is
//! enabled; the disabled variant surfaces `AppError::StoreDisabled` and
//! the API layer shapes the degraded response.

pub mod postgres;
pub mod store;

pub use postgres::PgImageStore;
pub use store::{DisabledImageStore, ImageStore};
