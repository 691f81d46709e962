//! Bridge from the synchronous public API to async reqwest.

use std::future::Future;

use crate::{Error, Result};

/// Block on the given future with a current-thread Tokio runtime with time
/// and I/O enabled.
///
/// HTTP clients must be built inside the future; a client is bound to the
/// runtime that first drives it.
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()
        .map_err(Error::Runtime)?;

    rt.block_on(future)
}
