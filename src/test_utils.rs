//! Test utilities and mock factories.
//!
//! This module provides a scripted stand-in for the `mmsg` binary and a few
//! helpers for inspecting bridge events. Only compiled in test builds.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::bridge::{BridgeEvent, Subscription};
use crate::error::MmsgError;
use crate::mmsg::{Mmsg, Query, build_args};

/// What the fake tool does for a given argument list.
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// Exit 0 and print this (already trimmed by the real runner, so trim here too).
    Output(String),
    /// Behave as if the binary were missing.
    NotFound,
    /// Behave as if the process hung past its deadline.
    Timeout,
    /// Exit with this non-zero status.
    Exit(i32),
}

impl FakeReply {
    pub fn output(text: &str) -> Self {
        FakeReply::Output(text.to_string())
    }
}

/// Scripted `mmsg`. Unscripted argument lists behave like a missing binary.
#[derive(Debug, Default)]
pub struct FakeMmsg {
    replies: Mutex<HashMap<Vec<String>, FakeReply>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeMmsg {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the reply for `query` as issued by a bridge with `monitor`.
    pub fn reply(&self, monitor: Option<&str>, query: Query, reply: FakeReply) {
        let args = build_args(monitor, query.flags());
        self.replies.lock().unwrap().insert(args, reply);
    }

    /// Every argument list seen so far, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Mmsg for FakeMmsg {
    async fn run(&self, args: &[String]) -> Result<String, MmsgError> {
        self.calls.lock().unwrap().push(args.to_vec());
        let reply = self.replies.lock().unwrap().get(args).cloned();

        match reply {
            Some(FakeReply::Output(text)) => Ok(text.trim().to_string()),
            Some(FakeReply::Timeout) => Err(MmsgError::Timeout(Duration::from_secs(5))),
            Some(FakeReply::Exit(code)) => Err(MmsgError::Exited {
                code: Some(code),
                stderr: String::new(),
            }),
            Some(FakeReply::NotFound) | None => Err(MmsgError::NotFound("mmsg".to_string())),
        }
    }
}

/// A fake answering all four queries like a single-monitor mango session:
/// 9 tags, tags 1-2 occupied, tag 1 active, tiled, a kitty window focused.
pub fn scripted_mango(monitor: Option<&str>) -> Arc<FakeMmsg> {
    let fake = Arc::new(FakeMmsg::new());
    fake.reply(monitor, Query::TagCount, FakeReply::output("9\n"));
    fake.reply(
        monitor,
        Query::Tags,
        FakeReply::output("DP-1 tags 000000011 000000001\n"),
    );
    fake.reply(monitor, Query::Layout, FakeReply::output("DP-1 tile\n"));
    fake.reply(monitor, Query::Client, FakeReply::output("Terminal kitty\n"));
    fake
}

/// Collect every event currently queued for a subscription.
pub fn drain(subscription: &Subscription) -> Vec<BridgeEvent> {
    subscription.events.try_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unscripted_is_not_found() {
        let fake = FakeMmsg::new();
        let result = fake.run(&["-T".to_string()]).await;
        assert!(matches!(result, Err(MmsgError::NotFound(_))));
        assert_eq!(fake.calls(), vec![vec!["-T"]]);
    }

    #[tokio::test]
    async fn test_scripted_mango_answers_with_monitor() {
        let fake = scripted_mango(Some("DP-3"));
        let args = build_args(Some("DP-3"), Query::TagCount.flags());
        assert_eq!(fake.run(&args).await.unwrap(), "9");
    }
}
