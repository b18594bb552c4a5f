//! Snapshot of compositor state as seen through `mmsg`.

use serde::{Deserialize, Serialize};

use crate::mmsg::parse::{MAX_TAGS, TagMasks, decode_mask};

/// Number of tags assumed before the first successful `-T` query.
pub const DEFAULT_TAG_COUNT: u32 = 9;

/// The focused window on the bridge's monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusedClient {
    pub title: String,
    pub app_id: String,
}

impl FocusedClient {
    pub fn new(title: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            app_id: app_id.into(),
        }
    }
}

/// Tag-related part of the state, handed out with [`BridgeEvent::TagsChanged`].
///
/// [`BridgeEvent::TagsChanged`]: super::BridgeEvent::TagsChanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagState {
    pub available_tags: Vec<u32>,
    pub active_tags: Vec<u32>,
    pub occupied_tags: Vec<u32>,
}

/// Everything the bridge knows about one monitor.
///
/// Invariants: `tag_count >= 1`, `available_tags == 1..=tag_count`, and the
/// active and occupied lists only contain available tags, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositorState {
    pub monitor_filter: Option<String>,
    pub tag_count: u32,
    pub available_tags: Vec<u32>,
    pub active_tags: Vec<u32>,
    pub occupied_tags: Vec<u32>,
    pub current_layout: Option<String>,
    pub focused_client: Option<FocusedClient>,
}

impl CompositorState {
    pub fn new(monitor_filter: Option<String>, tag_count: u32) -> Self {
        let tag_count = tag_count.clamp(1, MAX_TAGS);
        Self {
            monitor_filter,
            tag_count,
            available_tags: (1..=tag_count).collect(),
            active_tags: Vec::new(),
            occupied_tags: Vec::new(),
            current_layout: None,
            focused_client: None,
        }
    }

    /// Apply a new tag count. Returns whether anything changed.
    ///
    /// Stored active/occupied tags beyond the new count are dropped right
    /// away so the subset invariant holds even if the mask query fails.
    pub fn set_tag_count(&mut self, count: u32) -> bool {
        let count = count.clamp(1, MAX_TAGS);
        if count == self.tag_count {
            return false;
        }

        self.tag_count = count;
        self.available_tags = (1..=count).collect();
        self.active_tags.retain(|&tag| tag <= count);
        self.occupied_tags.retain(|&tag| tag <= count);
        true
    }

    /// Apply decoded masks. Returns whether either tag list changed.
    pub fn set_masks(&mut self, masks: TagMasks) -> bool {
        let occupied = decode_mask(masks.occupied, self.tag_count);
        let active = decode_mask(masks.active, self.tag_count);

        if occupied == self.occupied_tags && active == self.active_tags {
            return false;
        }

        self.occupied_tags = occupied;
        self.active_tags = active;
        true
    }

    /// Store a layout string. Returns whether it differs from the previous one.
    pub fn set_layout(&mut self, layout: String) -> bool {
        if self.current_layout.as_deref() == Some(layout.as_str()) {
            return false;
        }
        self.current_layout = Some(layout);
        true
    }

    /// Store the focused client (or its absence). Returns whether it changed.
    pub fn set_focused_client(&mut self, client: Option<FocusedClient>) -> bool {
        if self.focused_client == client {
            return false;
        }
        self.focused_client = client;
        true
    }

    pub fn tags(&self) -> TagState {
        TagState {
            available_tags: self.available_tags.clone(),
            active_tags: self.active_tags.clone(),
            occupied_tags: self.occupied_tags.clone(),
        }
    }

    pub fn is_active(&self, tag: u32) -> bool {
        self.active_tags.contains(&tag)
    }

    pub fn is_occupied(&self, tag: u32) -> bool {
        self.occupied_tags.contains(&tag)
    }
}

impl Default for CompositorState {
    fn default() -> Self {
        Self::new(None, DEFAULT_TAG_COUNT)
    }
}
