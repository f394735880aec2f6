//! Bridges async work on a tokio runtime to a frame-driven caller.
//!
//! The UI cannot await, so a feed load is spawned once and then polled each
//! frame with [`LoadHandle::try_take`] until the result is available.

use crate::prelude::Future;
use futures::future::FutureExt;
use tokio::{runtime::Handle, task::JoinHandle};

/// Handle to one spawned task whose output is collected by polling
pub struct LoadHandle<T> {
    handle: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> LoadHandle<T> {
    /// Spawns `future` on `runtime`. `notify` runs once the output is ready,
    /// typically to request a repaint.
    pub fn spawn<F, N>(runtime: &Handle, future: F, notify: N) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        N: FnOnce() + Send + 'static,
    {
        let handle = runtime.spawn(async move {
            let output = future.await;
            notify();
            output
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Whether the task completed (or was cancelled, or already taken)
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Takes the output once the task is done. Returns `None` while the task
    /// runs, after a cancellation, or when the output was already taken.
    pub fn try_take(&mut self) -> Option<T> {
        let handle = self.handle.take()?;
        if !handle.is_finished() {
            self.handle = Some(handle);
            return None;
        }
        match handle.now_or_never() {
            Some(Ok(output)) => Some(output),
            Some(Err(e)) => {
                if e.is_panic() {
                    log::error!("load task panicked: {}", e);
                }
                None
            }
            None => None,
        }
    }

    /// Aborts the task; its output is dropped
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for LoadHandle<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
