use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, ThreadId};

/// Work scheduled onto the context thread. It receives the target the queue
/// was created for (usually the `Stage`).
pub type ContextJob<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Queue of jobs that must run on the context thread.
///
/// Other threads hold a [`ContextHandle`]; the owner drains the queue once per
/// frame, before any actor hook runs.
pub struct ContextQueue<T> {
    tx: Sender<ContextJob<T>>,
    rx: Receiver<ContextJob<T>>,
    owner: ThreadId,
}

impl<T> ContextQueue<T> {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx, owner: thread::current().id() }
    }

    pub fn handle(&self) -> ContextHandle<T> {
        ContextHandle { tx: self.tx.clone() }
    }

    pub fn is_context_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Removes every pending job, in submission order.
    pub fn take_pending(&self) -> Vec<ContextJob<T>> {
        debug_assert!(self.is_context_thread(), "context queue drained off the context thread");
        self.rx.try_iter().collect()
    }
}

impl<T> Default for ContextQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable, `Send` handle for scheduling work onto the context thread.
pub struct ContextHandle<T> {
    tx: Sender<ContextJob<T>>,
}

impl<T> Clone for ContextHandle<T> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<T> ContextHandle<T> {
    /// Schedules `job` for the next frame. Returns `false` once the queue is gone.
    pub fn ensure<F>(&self, job: F) -> bool
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.tx.send(Box::new(job)).is_ok()
    }
}
