//! Background execution context for blocking session work.

use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// One owned worker thread consuming a FIFO job queue.
///
/// The worker starts empty; `start` spawns the thread, `spawn` enqueues
/// jobs, and `wait` closes the queue and blocks until every job enqueued
/// before the call has run. Dropping a `Worker` without calling `wait`
/// leaves the thread to drain its queue detached.
pub struct Worker {
    inner: Mutex<WorkerInner>,
}

struct WorkerInner {
    tx: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
    shut_down: bool,
}

impl Worker {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(WorkerInner {
                tx: None,
                handle: None,
                shut_down: false,
            }),
        }
    }

    /// Spawns the worker thread if it is not already running.
    ///
    /// No-op after `wait`.
    pub fn start(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.tx.is_some() || inner.shut_down {
            return;
        }
        let (tx, rx) = mpsc::channel::<Job>();
        let handle = thread::spawn(move || {
            while let Ok(job) = rx.recv() {
                job();
            }
            debug!("session worker drained");
        });
        inner.tx = Some(tx);
        inner.handle = Some(handle);
    }

    /// Enqueues a job for the worker thread.
    ///
    /// Returns `false` and drops the job when the worker has not been
    /// started or has already shut down.
    pub fn spawn(&self, job: impl FnOnce() + Send + 'static) -> bool {
        let inner = self.inner.lock().unwrap();
        match &inner.tx {
            Some(tx) => tx.send(Box::new(job)).is_ok(),
            None => false,
        }
    }

    /// Closes the queue and blocks until every job enqueued before the call
    /// has run and the worker thread has exited.
    ///
    /// Must never be called from a worker job or from an engine callback;
    /// both would deadlock. Idempotent.
    pub fn wait(&self) {
        let handle = {
            let mut inner = self.inner.lock().unwrap();
            inner.shut_down = true;
            // Dropping the sender ends the receive loop once the queue is empty.
            inner.tx.take();
            inner.handle.take()
        };
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("session worker panicked");
            }
        }
    }
}

impl Default for Worker {
    fn default() -> Self {
        Self::new()
    }
}
