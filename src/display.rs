//! Text rendering of bridge state for the command-line front end.
//!
//! The bridge stores the layout exactly as `mmsg` prints it, which may carry a
//! `<monitor> ` prefix; stripping it happens here.

use crate::bridge::CompositorState;

/// Short label for a layout: the first two letters of its name, upper-cased.
///
/// `"DP-3 tile"` becomes `"TI"`; an unknown layout becomes `"UN"`.
pub fn layout_label(layout: Option<&str>) -> String {
    match layout.map(layout_name) {
        Some(name) if !name.is_empty() => name.chars().take(2).collect::<String>().to_uppercase(),
        _ => "UN".to_string(),
    }
}

/// The layout name without any monitor prefix.
pub fn layout_name(layout: &str) -> &str {
    layout.split_whitespace().last().unwrap_or("")
}

/// One cell per available tag: `[n]` when active, `n*` when only occupied,
/// plain `n` otherwise.
pub fn tag_row(state: &CompositorState) -> String {
    state
        .available_tags
        .iter()
        .map(|&tag| {
            if state.is_active(tag) {
                format!("[{}]", tag)
            } else if state.is_occupied(tag) {
                format!("{}*", tag)
            } else {
                tag.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title of the focused client, falling back to its app id.
pub fn client_label(state: &CompositorState) -> String {
    match &state.focused_client {
        Some(client) if client.title.is_empty() => client.app_id.clone(),
        Some(client) => client.title.clone(),
        None => String::new(),
    }
}
