//! Provider client cache.
//!
//! One [`ChatBackend`] per distinct API key, built lazily on first use and
//! shared afterwards. Each key owns a `tokio::sync::OnceCell`: concurrent
//! first callers wait on the same cell, so construction runs exactly once,
//! and a failed construction drops the cell so the next caller starts over.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::error::BackendError;
use crate::traits::{ChatBackend, ClientFactory};

type ClientCell = Arc<OnceCell<Arc<dyn ChatBackend>>>;

/// Memoizes backends built by a [`ClientFactory`], keyed by API key.
pub struct ClientCache {
    factory: Arc<dyn ClientFactory>,
    cells: Mutex<HashMap<String, ClientCell>>,
}

impl ClientCache {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            factory,
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Return the client for `api_key`, building it on first use.
    ///
    /// The map lock is only held while looking up the cell, never during
    /// construction.
    pub async fn get_client(&self, api_key: &str) -> Result<Arc<dyn ChatBackend>, BackendError> {
        let cell = {
            let mut cells = self.cells.lock().await;
            cells.entry(api_key.to_string()).or_default().clone()
        };

        let result = cell
            .get_or_try_init(|| async {
                debug!("Constructing provider client");
                self.factory.build(api_key)
            })
            .await;

        match result {
            Ok(client) => Ok(Arc::clone(client)),
            Err(e) => {
                self.forget_empty(api_key, &cell).await;
                Err(e)
            }
        }
    }

    /// Remove `cell` from the map if it is still the entry for `api_key` and
    /// nobody has filled it in the meantime.
    async fn forget_empty(&self, api_key: &str, cell: &ClientCell) {
        let mut cells = self.cells.lock().await;
        let stale = cells
            .get(api_key)
            .is_some_and(|current| Arc::ptr_eq(current, cell) && !current.initialized());
        if stale {
            cells.remove(api_key);
        }
    }

    /// Number of successfully constructed clients.
    pub async fn cached_clients(&self) -> usize {
        self.cells
            .lock()
            .await
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }
}
