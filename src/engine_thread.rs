use std::panic;
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};

/// Handle to the one background task of the current phase.
///
/// The controller must `join` the outgoing task before spawning the next, so a
/// handle is consumed by joining and never cloned.
pub struct TaskHandle<T> {
    name: &'static str,
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> TaskHandle<T> {
    /// spawn a named worker thread with an explicit stack size
    /// (merge and quick sort recurse once per span)
    pub fn spawn<F>(name: &'static str, stack_bytes: usize, body: F) -> Result<Self>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name(name.to_owned())
            .stack_size(stack_bytes)
            .spawn(move || {
                profiling::register_thread!();
                body()
            })
            .map_err(|source| Error::Spawn { name, source })?;
        log::debug!("spawned {name}");
        Ok(Self { name, handle })
    }
}

impl<T> TaskHandle<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task and return its result.
    /// A panic inside the task is re-raised here so it takes the process down.
    pub fn join(self) -> T {
        let name = self.name;
        match self.handle.join() {
            Ok(value) => {
                log::debug!("joined {name}");
                value
            }
            Err(payload) => {
                log::error!("{name} panicked");
                panic::resume_unwind(payload)
            }
        }
    }
}
