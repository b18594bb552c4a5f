//! The `watch` loop: print the initial snapshot, then one JSON line per event.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::bridge::{BridgeEvent, CompositorBridge, CompositorState};
use crate::display::layout_label;
use crate::mmsg::Mmsg;

/// One line of `watch` output.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WatchLine<'a> {
    Snapshot {
        event: &'static str,
        layout_label: String,
        #[serde(flatten)]
        state: &'a CompositorState,
    },
    Change(&'a BridgeEvent),
}

impl<'a> WatchLine<'a> {
    pub fn snapshot(state: &'a CompositorState) -> Self {
        WatchLine::Snapshot {
            event: "snapshot",
            layout_label: layout_label(state.current_layout.as_deref()),
            state,
        }
    }
}

/// Write a value as a single JSON line and flush.
pub fn write_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value).context("Failed to serialize output line")?;
    out.write_all(b"\n").context("Failed to write output")?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}

/// Stream bridge events to `out` until the bridge goes away or `out` closes.
pub async fn run_watch_loop<M: Mmsg, W: Write>(
    bridge: &CompositorBridge<M>,
    out: &mut W,
) -> Result<()> {
    let subscription = bridge.subscribe();
    write_line(out, &WatchLine::snapshot(&bridge.snapshot()))?;

    info!("Watching compositor state");

    while let Ok(event) = subscription.events.recv_async().await {
        debug!(?event, "Bridge event");
        if let Err(e) = write_line(out, &WatchLine::Change(&event)) {
            // Usually a closed pipe: the consumer went away
            debug!("Output closed: {:#}", e);
            break;
        }
    }

    bridge.unsubscribe(subscription.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{BridgeOptions, FocusedClient};

    #[test]
    fn test_snapshot_line_shape() {
        let mut state = CompositorState::new(Some("DP-3".to_string()), 4);
        state.set_layout("DP-3 tile".to_string());
        state.set_focused_client(Some(FocusedClient::new("Inbox", "thunderbird")));

        let mut out = Vec::new();
        write_line(&mut out, &WatchLine::snapshot(&state)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));

        let json: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(json["event"], "snapshot");
        assert_eq!(json["layout_label"], "TI");
        assert_eq!(json["monitor_filter"], "DP-3");
        assert_eq!(json["available_tags"], serde_json::json!([1, 2, 3, 4]));
        assert_eq!(json["focused_client"]["app_id"], "thunderbird");
    }

    #[test]
    fn test_change_line_shape() {
        let event = BridgeEvent::LayoutChanged {
            layout: "DP-1 monocle".to_string(),
        };
        let mut out = Vec::new();
        write_line(&mut out, &WatchLine::Change(&event)).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["event"], "layout_changed");
        assert_eq!(json["layout"], "DP-1 monocle");
    }

    /// A writer that accepts `limit` lines and then fails like a closed pipe.
    struct ClosingWriter {
        lines: Vec<u8>,
        limit: usize,
    }

    impl Write for ClosingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let written = self.lines.iter().filter(|&&b| b == b'\n').count();
            if written >= self.limit {
                return Err(std::io::ErrorKind::BrokenPipe.into());
            }
            self.lines.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_watch_loop_stops_when_output_closes() {
        use crate::mmsg::Query;
        use crate::test_utils::{FakeReply, scripted_mango};
        use std::time::Duration;

        let fake = scripted_mango(None);
        let options = BridgeOptions {
            poll_interval: Duration::from_millis(10),
            ..BridgeOptions::default()
        };
        let bridge = CompositorBridge::create(fake.clone(), options).await;
        fake.reply(None, Query::Layout, FakeReply::output("DP-1 grid"));

        let mut out = ClosingWriter {
            lines: Vec::new(),
            limit: 1,
        };
        tokio::time::timeout(Duration::from_secs(2), run_watch_loop(&bridge, &mut out))
            .await
            .expect("watch loop did not stop")
            .unwrap();

        let text = String::from_utf8(out.lines).unwrap();
        assert!(text.starts_with("{\"event\":\"snapshot\""));
    }
}
