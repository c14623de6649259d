//! Background task executor.
//!
//! A fixed pool of worker threads fed through a channel. Jobs are
//! fire-and-forget closures; the image cache uses this for bounded-parallel
//! image resolution. Workers exit once every executor handle is dropped.

use parking_lot::Mutex;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::debug;

type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Clone)]
pub struct BackgroundExecutor {
    tx: Sender<Job>,
}

impl Default for BackgroundExecutor {
    /// Pool sized for image resolution.
    fn default() -> Self {
        Self::new(crate::constants::IMAGE_LOAD_WORKERS)
    }
}

impl BackgroundExecutor {
    pub fn new(workers: usize) -> Self {
        let (tx, rx) = channel::<Job>();
        let rx = Arc::new(Mutex::new(rx));
        for n in 0..workers.max(1) {
            let rx = Arc::clone(&rx);
            thread::Builder::new()
                .name(format!("moodcrate-bg-{n}"))
                .spawn(move || worker_loop(rx))
                .ok();
        }
        Self { tx }
    }

    /// Queue a job. Silently dropped if the pool has already shut down.
    pub fn spawn(&self, job: impl FnOnce() + Send + 'static) {
        if self.tx.send(Box::new(job)).is_err() {
            debug!("background pool is shut down, dropping job");
        }
    }
}

fn worker_loop(rx: Arc<Mutex<Receiver<Job>>>) {
    loop {
        let job = {
            let guard = rx.lock();
            guard.recv()
        };
        match job {
            Ok(job) => job(),
            Err(_) => break,
        }
    }
}
