//! Serial UI-thread task dispatch.
//!
//! Every window runs on a single UI thread. Work produced elsewhere, such as
//! a background thread delivering a new resource bundle, is posted to the
//! window's [`UiDispatcher`] and runs the next time the UI thread drains the
//! queue. Posting is thread-safe; draining is only allowed on the thread that
//! created the dispatcher.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender};

use crate::error::{RecastError, Result};
use crate::logging::targets;
use crate::thread_check::ThreadAffinity;

/// A unit of work bound for a UI thread.
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// A unique identifier for a posted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

struct QueuedTask {
    id: TaskId,
    task: UiTask,
}

/// A FIFO task queue drained on its owning thread.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use horizon_recast_core::dispatcher::UiDispatcher;
///
/// let dispatcher = Arc::new(UiDispatcher::new());
/// let ran = Arc::new(AtomicBool::new(false));
///
/// let remote = dispatcher.clone();
/// let flag = ran.clone();
/// std::thread::spawn(move || {
///     remote.post(move || flag.store(true, Ordering::SeqCst)).unwrap();
/// })
/// .join()
/// .unwrap();
///
/// assert!(!ran.load(Ordering::SeqCst));
/// assert_eq!(dispatcher.process_pending(), 1);
/// assert!(ran.load(Ordering::SeqCst));
/// ```
pub struct UiDispatcher {
    tx: Sender<QueuedTask>,
    rx: Receiver<QueuedTask>,
    affinity: ThreadAffinity,
    closed: AtomicBool,
}

static_assertions::assert_impl_all!(UiDispatcher: Send, Sync);

impl Default for UiDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl UiDispatcher {
    /// Create a dispatcher bound to the current thread.
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            tx,
            rx,
            affinity: ThreadAffinity::current(),
            closed: AtomicBool::new(false),
        }
    }

    /// The thread this dispatcher drains on.
    pub fn affinity(&self) -> ThreadAffinity {
        self.affinity
    }

    /// Queue a task for the UI thread.
    ///
    /// Fails with [`RecastError::DispatcherClosed`] once [`close`](Self::close)
    /// has been called.
    pub fn post<F>(&self, task: F) -> Result<TaskId>
    where
        F: FnOnce() + Send + 'static,
    {
        self.post_boxed(Box::new(task))
    }

    /// Queue an already boxed task.
    pub fn post_boxed(&self, task: UiTask) -> Result<TaskId> {
        if self.is_closed() {
            return Err(RecastError::DispatcherClosed);
        }
        let id = next_task_id();
        self.tx
            .send(QueuedTask { id, task })
            .map_err(|_| RecastError::DispatcherClosed)?;
        tracing::trace!(target: targets::DISPATCH, task = id.as_u64(), "task posted");
        Ok(id)
    }

    /// Number of tasks waiting to run.
    pub fn pending_count(&self) -> usize {
        self.rx.len()
    }

    /// Check if there are tasks waiting to run.
    pub fn has_pending(&self) -> bool {
        !self.rx.is_empty()
    }

    /// Run every queued task, including tasks posted by the tasks themselves.
    ///
    /// Returns the number of tasks processed.
    ///
    /// # Panics
    ///
    /// Panics if called from a thread other than the one that created the
    /// dispatcher.
    pub fn process_pending(&self) -> usize {
        self.affinity
            .assert_same_thread("UiDispatcher::process_pending called off the UI thread");

        let mut count = 0;
        while let Ok(queued) = self.rx.try_recv() {
            tracing::trace!(target: targets::DISPATCH, task = queued.id.as_u64(), "running task");
            (queued.task)();
            count += 1;
        }
        count
    }

    /// Stop accepting new tasks and drop anything still queued.
    pub fn close(&self) -> usize {
        self.closed.store(true, Ordering::SeqCst);
        let mut dropped = 0;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            tracing::debug!(target: targets::DISPATCH, dropped, "dispatcher closed with pending tasks");
        }
        dropped
    }

    /// Check if the dispatcher has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for UiDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiDispatcher")
            .field("affinity", &self.affinity)
            .field("pending", &self.pending_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parking_lot::Mutex;

    #[test]
    fn tasks_run_in_order() {
        let dispatcher = UiDispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let log = log.clone();
            dispatcher.post(move || log.lock().push(i)).unwrap();
        }

        assert_eq!(dispatcher.pending_count(), 3);
        assert_eq!(dispatcher.process_pending(), 3);
        assert_eq!(*log.lock(), vec![0, 1, 2]);
        assert!(!dispatcher.has_pending());
    }

    #[test]
    fn task_ids_are_unique() {
        let dispatcher = UiDispatcher::new();
        let a = dispatcher.post(|| {}).unwrap();
        let b = dispatcher.post(|| {}).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn process_off_thread_panics() {
        let dispatcher = Arc::new(UiDispatcher::new());
        let remote = dispatcher.clone();
        let result = std::thread::spawn(move || remote.process_pending()).join();
        assert!(result.is_err());
    }

    #[test]
    fn closed_dispatcher_rejects_tasks() {
        let dispatcher = UiDispatcher::new();
        dispatcher.post(|| {}).unwrap();

        assert_eq!(dispatcher.close(), 1);
        assert!(dispatcher.is_closed());
        assert!(matches!(dispatcher.post(|| {}), Err(RecastError::DispatcherClosed)));
    }
}
