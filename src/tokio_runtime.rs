//! Tokio runtime for mangobar.
//!
//! Everything runs on one cooperative event loop: the bridge's polling task,
//! the mmsg child processes it awaits and the output loop all share a single
//! current-thread runtime. There are no worker threads.

use std::future::Future;

use tokio::runtime::{Builder, Runtime};

/// Build the single-threaded runtime with IO and timers enabled.
pub fn build() -> std::io::Result<Runtime> {
    Builder::new_current_thread().enable_all().build()
}

/// Build a runtime and drive `future` to completion on it.
pub fn block_on<F: Future>(future: F) -> std::io::Result<F::Output> {
    Ok(build()?.block_on(future))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_runtime_has_timers() {
        let value = block_on(async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            42
        })
        .unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_spawned_tasks_run_on_the_same_loop() {
        let value = block_on(async {
            let thread = std::thread::current().id();
            tokio::spawn(async move { std::thread::current().id() == thread })
                .await
                .unwrap()
        })
        .unwrap();
        assert!(value);
    }
}
