//! Single-writer task for preference persistence.
//!
//! All saves flow through one queue consumed by one task, so two
//! concurrent saves can never interleave on disk. Enqueueing is
//! synchronous and never blocks, so a mutation can queue its snapshot
//! while still holding the lock it snapshotted under; queue order then
//! matches mutation order and the store cannot end up holding an older
//! snapshot than memory. Callers get the outcome of their own write
//! back through a oneshot reply.

use std::sync::Arc;

use log::{debug, error};
use tokio::sync::{mpsc, oneshot};

use super::preferences::PreferencesStore;
use super::StoreError;

struct WriteJob {
    key: String,
    value: String,
    reply: oneshot::Sender<Result<(), StoreError>>,
}

/// Cheap handle to the writer task. Clone freely.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::UnboundedSender<WriteJob>,
}

impl WriteHandle {
    /// Queues one write and hands back a ticket for its outcome.
    ///
    /// Never blocks or yields, so callers may enqueue under a lock to
    /// pin the write's queue position to the state they snapshotted.
    pub fn enqueue(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<WriteTicket, StoreError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job = WriteJob {
            key: key.into(),
            value: value.into(),
            reply: reply_tx,
        };
        self.tx.send(job).map_err(|_| StoreError::WriterStopped)?;
        Ok(WriteTicket { reply: reply_rx })
    }
}

/// Claim on the outcome of one queued write.
#[must_use]
pub struct WriteTicket {
    reply: oneshot::Receiver<Result<(), StoreError>>,
}

impl WriteTicket {
    /// Waits until the writer has applied (or failed) this write.
    pub async fn wait(self) -> Result<(), StoreError> {
        self.reply.await.map_err(|_| StoreError::WriterStopped)?
    }
}

/// Spawns the writer task. Must be called from within a Tokio runtime.
///
/// The queue is unbounded; depth stays small in practice because every
/// caller awaits its ticket before issuing another write. The task runs
/// until every [`WriteHandle`] clone has been dropped.
pub fn spawn_writer(store: Arc<dyn PreferencesStore>) -> WriteHandle {
    let (tx, mut rx) = mpsc::unbounded_channel::<WriteJob>();

    tokio::spawn(async move {
        debug!("Preference writer started");
        while let Some(job) = rx.recv().await {
            let result = store.put_blob(&job.key, &job.value);
            if let Err(e) = &result {
                error!("Write for preference '{}' failed: {}", job.key, e);
            }
            // Caller may have given up waiting; that is fine.
            let _ = job.reply.send(result);
        }
        debug!("Preference writer stopped");
    });

    WriteHandle { tx }
}
