//! transport contract
//!
//! anything that can send a query document with variables and hand back the
//! response data. [`crate::Client`] is the http implementation; tests plug in
//! in-memory fakes.

use crate::error::Result;
use std::future::Future;

/// executes rendered queries
pub trait Transport {
    /// send `query` with `variables` and return the response `data` payload
    fn execute(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> impl Future<Output = Result<serde_json::Value>> + Send;
}

