//! Cancellable one-shot and repeating timers
//!
//! Every scheduled timer is a small tokio task that posts a [`TimerFired`]
//! message to the owning loop. The [`TimerHandle`] returned by the
//! [`Scheduler`] owns that task: dropping the handle aborts it. A firing that
//! was already queued when its handle was dropped carries a stale id, and
//! [`TimerHandle::owns`] rejects it.

use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, sleep_until, Instant, MissedTickBehavior},
};
use tracing::debug;

/// What a timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Deferred long-press detection of the current contact
    LongPress,
    /// One-second countdown cadence
    Countdown,
    /// Alarm chime cadence
    AlarmRepeat,
}

/// Message posted each time a timer elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub kind: TimerKind,
    pub id: u64,
}

/// Owning handle of a scheduled timer; dropping it cancels the timer
#[derive(Debug)]
pub struct TimerHandle {
    kind: TimerKind,
    id: u64,
    task: JoinHandle<()>,
}

impl TimerHandle {
    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Whether a firing was produced by this handle
    pub fn owns(&self, fired: &TimerFired) -> bool {
        self.kind == fired.kind && self.id == fired.id
    }

    /// Cancel the timer explicitly
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        debug!("Cancelling {:?} timer #{}", self.kind, self.id);
        self.task.abort();
    }
}

/// Hands out timer handles that report back on a single channel
#[derive(Debug)]
pub struct Scheduler {
    tx: mpsc::UnboundedSender<TimerFired>,
    next_id: u64,
}

impl Scheduler {
    /// Create a scheduler and the receiver its timers report to
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerFired>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, next_id: 0 }, rx)
    }

    fn allocate(&mut self, kind: TimerKind) -> TimerFired {
        self.next_id += 1;
        TimerFired { kind, id: self.next_id }
    }

    /// Fire once after `delay`
    pub fn once(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle {
        let fired = self.allocate(kind);
        let tx = self.tx.clone();
        debug!("Scheduling {:?} timer #{} in {:?}", kind, fired.id, delay);

        let deadline = Instant::now() + delay;
        let task = tokio::spawn(async move {
            sleep_until(deadline).await;
            let _ = tx.send(fired);
        });

        TimerHandle { kind, id: fired.id, task }
    }

    /// Fire every `period`, the first time after `first`
    /// (`Duration::ZERO` fires right away).
    pub fn repeating(&mut self, kind: TimerKind, first: Duration, period: Duration) -> TimerHandle {
        let fired = self.allocate(kind);
        let tx = self.tx.clone();
        debug!("Scheduling {:?} timer #{} every {:?}", kind, fired.id, period);

        let start = Instant::now() + first;
        let task = tokio::spawn(async move {
            let mut interval = interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(fired).is_err() {
                    // Owning loop is gone
                    break;
                }
            }
        });

        TimerHandle { kind, id: fired.id, task }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn once_fires_after_delay() {
        let (mut scheduler, mut rx) = Scheduler::new();
        let handle = scheduler.once(TimerKind::LongPress, Duration::from_millis(800));

        time::advance(Duration::from_millis(799)).await;
        assert!(rx.try_recv().is_err());

        let fired = rx.recv().await.unwrap();
        assert!(handle.owns(&fired));
        assert_eq!(fired.kind, TimerKind::LongPress);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_never_fires() {
        let (mut scheduler, mut rx) = Scheduler::new();
        let handle = scheduler.once(TimerKind::LongPress, Duration::from_millis(800));
        time::advance(Duration::from_millis(500)).await;
        handle.cancel();

        time::advance(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn repeating_fires_immediately_when_asked() {
        let (mut scheduler, mut rx) = Scheduler::new();
        let start = Instant::now();
        let period = Duration::from_millis(1500);
        let handle = scheduler.repeating(TimerKind::AlarmRepeat, Duration::ZERO, period);

        for expected_ms in [0, 1500, 3000] {
            let fired = rx.recv().await.unwrap();
            assert!(handle.owns(&fired));
            assert_eq!(start.elapsed(), Duration::from_millis(expected_ms));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stale_firing_is_not_owned_by_new_handle() {
        let (mut scheduler, mut rx) = Scheduler::new();
        let second_period = Duration::from_secs(1);
        let first = scheduler.repeating(TimerKind::Countdown, Duration::ZERO, second_period);
        let fired = rx.recv().await.unwrap();
        drop(first);

        let second = scheduler.repeating(TimerKind::Countdown, second_period, second_period);
        assert!(!second.owns(&fired));
        assert_eq!(second.kind(), TimerKind::Countdown);
    }
}
