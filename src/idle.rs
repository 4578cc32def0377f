//! Idle auto-lock: a pure policy plus a tokio watcher task.
//!
//! The vault's most security-relevant transition is `Unlocked → Locked`, so
//! its trigger lives next to the store even though it carries no
//! cryptography: lock after a fixed window of no input activity, or
//! immediately when the tab is hidden. The UI layer feeds [`ActivityEvent`]s
//! into the watcher; the policy itself is side-effect free and testable
//! without a runtime.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Default idle window before auto-lock.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Signals the host feeds to the watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEvent {
    /// Keyboard or pointer input; resets the idle countdown.
    Input,
    /// Tab visibility changed. Hiding the tab locks immediately.
    Visibility { visible: bool },
}

/// Pure lock decision over elapsed idle time and visibility.
#[derive(Debug, Clone, Copy)]
pub struct IdleLockPolicy {
    pub timeout: Duration,
}

impl Default for IdleLockPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

impl IdleLockPolicy {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn should_lock(&self, idle_for: Duration, visible: bool) -> bool {
        !visible || idle_for >= self.timeout
    }
}

/// Handle to a running watcher task. Dropping the handle cancels it.
pub struct IdleWatcher {
    events: mpsc::UnboundedSender<ActivityEvent>,
    task: JoinHandle<()>,
}

impl IdleWatcher {
    /// Spawn a watcher that invokes `on_lock` when the policy fires.
    ///
    /// `on_lock` must be idempotent: it may fire again after the next
    /// activity re-arms the countdown (e.g. the user unlocked in between).
    pub fn spawn<F>(policy: IdleLockPolicy, on_lock: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (events, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(policy, rx, on_lock));
        Self { events, task }
    }

    /// Report keyboard/pointer activity.
    pub fn activity(&self) {
        let _ = self.events.send(ActivityEvent::Input);
    }

    /// Report a tab visibility change.
    pub fn visibility(&self, visible: bool) {
        let _ = self.events.send(ActivityEvent::Visibility { visible });
    }
}

impl Drop for IdleWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<F>(
    policy: IdleLockPolicy,
    mut events: mpsc::UnboundedReceiver<ActivityEvent>,
    mut on_lock: F,
) where
    F: FnMut(),
{
    let mut deadline = Instant::now() + policy.timeout;
    // Disarmed after firing; the next input re-arms the countdown.
    let mut armed = true;
    loop {
        tokio::select! {
            _ = sleep_until(deadline), if armed => {
                debug!("idle timeout elapsed, locking");
                on_lock();
                armed = false;
            }
            event = events.recv() => match event {
                Some(ActivityEvent::Input) => {
                    deadline = Instant::now() + policy.timeout;
                    armed = true;
                }
                Some(ActivityEvent::Visibility { visible: false }) => {
                    debug!("tab hidden, locking");
                    on_lock();
                    armed = false;
                }
                Some(ActivityEvent::Visibility { visible: true }) => {}
                None => return,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locks_at_or_past_timeout() {
        let policy = IdleLockPolicy::default();
        assert!(!policy.should_lock(Duration::from_secs(59), true));
        assert!(policy.should_lock(Duration::from_secs(60), true));
        assert!(policy.should_lock(Duration::from_secs(300), true));
    }

    #[test]
    fn locks_immediately_when_hidden() {
        let policy = IdleLockPolicy::default();
        assert!(policy.should_lock(Duration::ZERO, false));
    }

    #[test]
    fn custom_timeout() {
        let policy = IdleLockPolicy::new(Duration::from_secs(5));
        assert!(!policy.should_lock(Duration::from_secs(4), true));
        assert!(policy.should_lock(Duration::from_secs(5), true));
    }
}
