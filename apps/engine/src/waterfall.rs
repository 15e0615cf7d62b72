//! The degradation combinator used by every AI-backed operation.
//!
//! Policy: try the AI path once, and on any error substitute a static
//! fallback — no intermediate retry. The fallback is a pure computation that
//! cannot fail, so every call through here terminates with a usable result
//! and the UI never branches on which path produced it. A worse-quality
//! static result is preferable to a broken flow.

use std::future::Future;

use tracing::warn;

use crate::errors::Result;

/// Awaits `primary`; on error logs the failure and returns `fallback()`.
pub async fn with_fallback<T, P, F>(operation: &str, primary: P, fallback: F) -> T
where
    P: Future<Output = Result<T>>,
    F: FnOnce() -> T,
{
    match primary.await {
        Ok(value) => value,
        Err(e) => {
            warn!("{operation} failed ({e}); using static fallback");
            fallback()
        }
    }
}
