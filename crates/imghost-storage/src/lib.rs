//! File storage for uploaded images.
//!
//! The `Storage` trait abstracts the byte-persistence backend; the only
//! shipped implementation is `LocalStorage`, a single flat directory on
//! the local filesystem. Stored names are always server-generated (see
//! [`keys::generate_stored_name`]) and never derived from client input.

pub mod keys;
pub mod local;
pub mod traits;

pub use keys::generate_stored_name;
pub use local::LocalStorage;
pub use traits::{ByteStream, Storage, StorageError, StorageResult};
