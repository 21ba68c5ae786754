//! Cancellable delayed tasks.
//!
//! `schedule` runs an action on a background thread once a delay has elapsed,
//! unless the returned `TaskHandle` is cancelled first. Dropping the handle counts
//! as cancelling it, so a task never outlives the owner that scheduled it.
use crossbeam_channel::{Sender, after, bounded, select};
use log::debug;
use std::thread;
use std::time::Duration;

/// Handle to a scheduled task.
pub struct TaskHandle {
    cancel_tx: Sender<()>,
}

impl TaskHandle {
    /// Stops the task if it has not fired yet. No effect afterwards.
    pub fn cancel(self) {
        let _ = self.cancel_tx.try_send(());
    }
}

/// Runs `action` on a background thread after `delay`.
pub fn schedule<F>(delay: Duration, action: F) -> TaskHandle
where
    F: FnOnce() + Send + 'static,
{
    let (cancel_tx, cancel_rx) = bounded::<()>(1);
    let deadline = after(delay);

    thread::spawn(move || {
        select! {
            // A closed channel means the handle was dropped.
            recv(cancel_rx) -> _ => debug!("Scheduled task cancelled"),
            recv(deadline) -> _ => action(),
        }
    });
    TaskHandle { cancel_tx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn fires_after_delay() {
        let (tx, rx) = unbounded();
        let _handle = schedule(Duration::from_millis(20), move || {
            let _ = tx.send(());
        });
        assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
    }

    #[test]
    fn cancelled_task_never_fires() {
        let (tx, rx) = unbounded();
        let handle = schedule(Duration::from_millis(50), move || {
            let _ = tx.send(());
        });
        handle.cancel();
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn dropping_the_handle_cancels() {
        let (tx, rx) = unbounded();
        drop(schedule(Duration::from_millis(50), move || {
            let _ = tx.send(());
        }));
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }
}
