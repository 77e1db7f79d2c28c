//! Fixed-size worker pool for the move advisor
//!
//! Workers pull boxed tasks from a shared FIFO queue guarded by a mutex and
//! sleep on a condition variable while it is empty. Every submission returns a
//! `TaskHandle` whose `wait` blocks until that task finished, handing back its
//! value or the panic it raised. Dropping the pool stops accepting work, lets
//! the workers drain whatever is still queued and joins every thread.

use crate::error::PoolError;
use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc, Condvar, Mutex};
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Queue {
    jobs: VecDeque<Job>,
    shutdown: bool,
}

struct Shared {
    queue: Mutex<Queue>,
    available: Condvar,
}

/// Thread pool with a fixed number of workers
pub struct WorkerPool {
    workers: Vec<thread::JoinHandle<()>>,
    num_threads: usize,
    shared: Arc<Shared>,
}

/// Completion handle of one submitted task
pub struct TaskHandle<T> {
    result: mpsc::Receiver<Result<T, String>>,
}

impl<T> TaskHandle<T> {
    /// Block until the task finished
    pub fn wait(self) -> Result<T, PoolError> {
        match self.result.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(PoolError::TaskPanicked(message)),
            Err(_) => Err(PoolError::Disconnected),
        }
    }
}

impl WorkerPool {
    pub fn new(num_threads: usize) -> Result<Self, PoolError> {
        if num_threads == 0 {
            return Err(PoolError::NoWorkers);
        }
        let shared = Arc::new(Shared {
            queue: Mutex::new(Queue {
                jobs: VecDeque::new(),
                shutdown: false,
            }),
            available: Condvar::new(),
        });

        let mut pool = WorkerPool {
            workers: Vec::with_capacity(num_threads),
            num_threads,
            shared,
        };
        for worker_id in 0..num_threads {
            let shared_clone = Arc::clone(&pool.shared);
            let handle = thread::Builder::new()
                .name(format!("scacchiera-worker-{}", worker_id))
                .spawn(move || worker_loop(&shared_clone))?;
            // on error the partially built pool is dropped, which joins the spawned workers
            pool.workers.push(handle);
        }
        log::debug!("worker pool started with {} threads", num_threads);
        Ok(pool)
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Queue a task; never blocks on the task itself
    pub fn submit<F, T>(&self, task: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let job: Job = Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(task)).map_err(panic_message);
            // the waiter may have given up on the handle
            let _ = tx.send(outcome);
        });
        {
            let mut queue = self
                .shared
                .queue
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            queue.jobs.push_back(job);
        }
        self.shared.available.notify_one();
        TaskHandle { result: rx }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        {
            let mut queue = self
                .shared
                .queue
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            queue.shutdown = true;
        }
        self.shared.available.notify_all();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
        log::debug!("worker pool with {} threads shut down", self.num_threads);
    }
}

fn worker_loop(shared: &Shared) {
    loop {
        let job = {
            let mut queue = shared
                .queue
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            loop {
                if let Some(job) = queue.jobs.pop_front() {
                    break job;
                }
                if queue.shutdown {
                    return;
                }
                queue = shared
                    .available
                    .wait(queue)
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
            }
        };
        job();
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
