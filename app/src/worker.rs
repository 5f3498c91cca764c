use async_trait::async_trait;
use std::time::Duration;

use crate::swallow_panic;

#[async_trait]
pub trait Worker: Send {
    async fn run(&mut self);
    fn timeout(&self) -> Duration;
}

/// Spawns a task that runs the worker forever, waiting [`Worker::timeout`] before each run. A
/// panicking run is dropped and the loop carries on.
pub fn start<W: Worker + 'static>(mut worker: W) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(worker.timeout()).await;
            swallow_panic(worker.run()).await;
        }
    });
}
