//! Deferred, batched graph drops
//!
//! Graphs queued here are dropped together on the next flush. Dropping an
//! absent graph is a no-op, so a flush can always be retried.

use crate::graph::Iri;
use crate::storage::{GraphUpdate, StorageResult, TripleStore};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct GraphDropQueue {
    store: Arc<dyn TripleStore>,
    pending: Mutex<Vec<Iri>>,
}

impl GraphDropQueue {
    pub fn new(store: Arc<dyn TripleStore>) -> Self {
        Self {
            store,
            pending: Mutex::new(Vec::new()),
        }
    }

    fn pending(&self) -> MutexGuard<'_, Vec<Iri>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a graph for the next flush
    pub fn enqueue(&self, graph: Iri) {
        let mut pending = self.pending();
        if !pending.contains(&graph) {
            pending.push(graph);
        }
    }

    pub fn len(&self) -> usize {
        self.pending().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending().is_empty()
    }

    /// Drop every queued graph in one batch; returns how many were flushed.
    ///
    /// The queue is taken atomically. On failure the graphs are queued again.
    pub fn flush(&self) -> StorageResult<usize> {
        let batch = std::mem::take(&mut *self.pending());
        if batch.is_empty() {
            return Ok(0);
        }

        let updates: Vec<GraphUpdate> = batch.iter().cloned().map(GraphUpdate::DropGraph).collect();
        match self.store.apply(&updates) {
            Ok(()) => {
                tracing::debug!(graphs = batch.len(), "flushed deferred graph drops");
                Ok(batch.len())
            }
            Err(e) => {
                tracing::warn!(error = %e, graphs = batch.len(), "graph drop flush failed; requeueing");
                for graph in batch {
                    self.enqueue(graph);
                }
                Err(e)
            }
        }
    }

    /// Flush on a fixed period until the returned task is aborted
    pub fn spawn_periodic(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let queue = self.clone();
                let flushed = tokio::task::spawn_blocking(move || queue.flush()).await;
                match flushed {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => tracing::warn!(error = %e, "periodic graph drop failed"),
                    Err(e) => tracing::warn!(error = %e, "periodic graph drop task panicked"),
                }
            }
        })
    }
}
