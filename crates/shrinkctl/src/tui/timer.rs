//! Tick task - the 1 Hz heartbeat behind the investigation timer

use super::event_loop::TuiMessage;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};

/// Owns the periodic tick task. At most one task exists at a time; `stop`
/// aborts it, and dropping the handle aborts it as well, so a torn-down TUI
/// never leaks a ticker.
#[derive(Debug, Default)]
pub struct TickHandle {
    task: Option<JoinHandle<()>>,
}

impl TickHandle {
    /// Start ticking once per second into `tx`. Restarting replaces the
    /// previous task.
    pub fn start(&mut self, tx: mpsc::Sender<TuiMessage>) {
        self.stop();
        let task = tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // A tokio interval yields immediately on its first tick; consume
            // it so the first message arrives a full second after start.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(TuiMessage::TimerTick).await.is_err() {
                    break;
                }
            }
        });
        self.task = Some(task);
    }

    /// Whether a tick task currently exists
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Cancel the tick task. Idempotent; no tick is produced after this
    /// returns.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
