use crate::error::{FilestoreError, Result};
use std::future::Future;
use tokio::runtime::{Builder, Handle, RuntimeFlavor};

/// Drive a store future to completion from synchronous code.
///
/// Catalog calls come from plain threads (jar submission) as well as Tokio
/// workers. A multi-thread worker hands its slot over with `block_in_place`.
/// A current-thread runtime cannot, and its IO driver would be stalled by
/// this very call, so the future gets a throwaway runtime on a scoped helper
/// thread. With no runtime at all the throwaway runtime runs inline.
pub fn run_blocking<F, Fut, T>(make_future: F) -> Result<T>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<T>> + Send,
    T: Send,
{
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| handle.block_on(make_future()))
        },
        Ok(_) => std::thread::scope(|scope| {
            scope
                .spawn(|| on_fresh_runtime(make_future))
                .join()
                .unwrap_or_else(|_| {
                    Err(FilestoreError::Other("Store helper thread panicked".into()))
                })
        }),
        Err(_) => on_fresh_runtime(make_future),
    }
}

fn on_fresh_runtime<F, Fut, T>(make_future: F) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| FilestoreError::Other(format!("Failed to start store runtime: {e}")))?;
    runtime.block_on(make_future())
}
