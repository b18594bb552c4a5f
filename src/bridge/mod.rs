//! Polling bridge between `mmsg` and the rest of the bar.
//!
//! A [`CompositorBridge`] keeps an eventually-consistent [`CompositorState`]
//! for one monitor (or for whichever monitor `mmsg` lists first when no
//! filter is set). Every poll runs four independent queries; a failure in one
//! keeps that piece of the previous state and never aborts the others.
//!
//! Change notifications go out through an explicit subscriber list:
//! layout and client changes are sent as soon as they are detected, and at
//! most one [`BridgeEvent::TagsChanged`] is sent at the end of a cycle.

mod events;
mod state;

pub use events::{BridgeEvent, EventBus, SubscriberId, Subscription};
pub use state::{CompositorState, DEFAULT_TAG_COUNT, FocusedClient, TagState};

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::mmsg::parse::{parse_client, parse_layout, parse_tag_count, parse_tag_lines};
use crate::mmsg::{self, Action, Mmsg, MmsgCommand, Query};

/// Default time between refreshes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Construction parameters for a bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeOptions {
    /// Only track this monitor (passed to `mmsg` as `-o <monitor>`).
    pub monitor: Option<String>,
    /// Fixed period between refreshes.
    pub poll_interval: Duration,
    /// Tag count assumed until `mmsg -T` answers.
    pub default_tag_count: u32,
}

impl BridgeOptions {
    pub fn for_monitor(monitor: Option<String>) -> Self {
        Self {
            monitor,
            ..Self::default()
        }
    }
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            monitor: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            default_tag_count: DEFAULT_TAG_COUNT,
        }
    }
}

impl From<&AppConfig> for BridgeOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            monitor: config.monitor.clone(),
            poll_interval: config.poll_interval(),
            default_tag_count: config.default_tag_count,
        }
    }
}

/// State shared between the bridge handle and its polling task.
struct Shared<M> {
    mmsg: M,
    monitor: Option<String>,
    state: Mutex<CompositorState>,
    bus: EventBus,
}

impl<M: Mmsg> Shared<M> {
    fn state(&self) -> MutexGuard<'_, CompositorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// One poll → diff → notify cycle. Always asks to be scheduled again.
    async fn refresh(&self) -> bool {
        let monitor = self.monitor.as_deref();
        let mut tags_dirty = false;

        if let Some(output) = mmsg::query(&self.mmsg, monitor, Query::TagCount).await {
            match parse_tag_count(&output) {
                Ok(count) => tags_dirty |= self.state().set_tag_count(count),
                Err(e) => debug!("Ignoring tag count: {}", e),
            }
        }

        if let Some(output) = mmsg::query(&self.mmsg, monitor, Query::Tags).await {
            match parse_tag_lines(&output, monitor) {
                Ok(masks) => tags_dirty |= self.state().set_masks(masks),
                Err(e) => debug!("Ignoring tag state: {}", e),
            }
        }

        if let Some(output) = mmsg::query(&self.mmsg, monitor, Query::Layout).await
            && let Some(layout) = parse_layout(&output)
        {
            let changed = self.state().set_layout(layout.clone());
            if changed {
                self.bus.emit(BridgeEvent::LayoutChanged { layout });
            }
        }

        if let Some(output) = mmsg::query(&self.mmsg, monitor, Query::Client).await {
            let client = parse_client(&output);
            let changed = self.state().set_focused_client(client.clone());
            if changed {
                self.bus.emit(BridgeEvent::ClientChanged { client });
            }
        }

        if tags_dirty {
            let tags = self.state().tags();
            self.bus.emit(BridgeEvent::TagsChanged(tags));
        }

        true
    }
}

/// Polls `mmsg` on a fixed interval and publishes state changes.
///
/// The polling task is started by [`CompositorBridge::create`] and cancelled
/// by [`CompositorBridge::dispose`] or when the bridge is dropped. A query
/// already in flight at that point is not killed; it just finishes unobserved.
pub struct CompositorBridge<M: Mmsg = MmsgCommand> {
    shared: Arc<Shared<M>>,
    task: Option<JoinHandle<()>>,
}

impl<M: Mmsg> CompositorBridge<M> {
    /// Build a bridge, refresh once, then start polling.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn create(mmsg: M, options: BridgeOptions) -> Self {
        let shared = Arc::new(Shared {
            mmsg,
            state: Mutex::new(CompositorState::new(
                options.monitor.clone(),
                options.default_tag_count,
            )),
            monitor: options.monitor,
            bus: EventBus::new(),
        });

        shared.refresh().await;

        let task = tokio::spawn(poll_loop(shared.clone(), options.poll_interval));
        info!(
            monitor = shared.monitor.as_deref().unwrap_or("<first>"),
            interval_ms = options.poll_interval.as_millis() as u64,
            "Compositor bridge started"
        );

        Self {
            shared,
            task: Some(task),
        }
    }

    /// Run a refresh cycle now, outside the regular schedule.
    pub async fn refresh(&self) -> bool {
        self.shared.refresh().await
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> CompositorState {
        self.shared.state().clone()
    }

    pub fn monitor(&self) -> Option<&str> {
        self.shared.monitor.as_deref()
    }

    pub fn subscribe(&self) -> Subscription {
        self.shared.bus.subscribe()
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.shared.bus.unsubscribe(id)
    }

    /// Advance the monitor to its next layout. Failures are ignored.
    pub async fn next_layout(&self) {
        mmsg::dispatch(&self.shared.mmsg, self.monitor(), &Action::NextLayout).await;
    }

    /// View tag `tag` on the monitor. Failures are ignored.
    pub async fn switch_tag(&self, tag: u32) {
        mmsg::dispatch(&self.shared.mmsg, self.monitor(), &Action::SwitchTag(tag)).await;
    }

    /// Whether the polling task is still scheduled.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop polling. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(monitor = ?self.shared.monitor, "Compositor bridge disposed");
        }
    }
}

impl<M: Mmsg> Drop for CompositorBridge<M> {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn poll_loop<M: Mmsg>(shared: Arc<Shared<M>>, period: Duration) {
    // The first refresh already ran in `create`
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !shared.refresh().await {
            break;
        }
    }
}
