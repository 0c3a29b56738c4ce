//! Recoverable construction errors.
//!
//! Only table allocation can fail in a way a caller may want to handle;
//! lookups and removals report absence through `Option`.

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    /// A table needs at least one bucket for `key % bucket_count`.
    #[error("hash table needs at least one bucket")]
    ZeroBuckets,

    /// The bucket array could not be allocated.
    #[error("cannot allocate bucket array: {0}")]
    Alloc(#[from] TryReserveError),
}
