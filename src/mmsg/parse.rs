//! Parsers for the textual output of `mmsg` queries.
//!
//! All functions here are pure: they take already-trimmed stdout and return
//! typed values. Deciding what to do with a parse failure is the bridge's job.

use crate::bridge::FocusedClient;
use crate::error::ParseError;

/// Longest bitmask the decoder accepts.
const MAX_MASK_BITS: usize = 64;

/// Highest tag number a mask can describe.
pub const MAX_TAGS: u32 = MAX_MASK_BITS as u32;

/// Occupied and active masks for one monitor, as printed by `mmsg -g -t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMasks {
    pub occupied: u64,
    pub active: u64,
}

/// Parse the output of `mmsg -T`.
///
/// Zero is rejected so that a bridge always has at least one tag.
pub fn parse_tag_count(output: &str) -> Result<u32, ParseError> {
    let trimmed = output.trim();
    match trimmed.parse::<u32>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(ParseError::InvalidTagCount(trimmed.to_string())),
    }
}

/// Parse a binary-digit string into a mask. Bit 0 (the rightmost digit) is tag 1.
pub fn parse_mask(digits: &str) -> Result<u64, ParseError> {
    if digits.is_empty() || digits.len() > MAX_MASK_BITS {
        return Err(ParseError::InvalidMask(digits.to_string()));
    }
    u64::from_str_radix(digits, 2).map_err(|_| ParseError::InvalidMask(digits.to_string()))
}

/// Decode a mask into the ordered list of 1-based tag numbers set in it,
/// ignoring bits beyond `tag_count`.
pub fn decode_mask(mask: u64, tag_count: u32) -> Vec<u32> {
    (1..=tag_count.min(MAX_TAGS))
        .filter(|tag| mask & (1u64 << (tag - 1)) != 0)
        .collect()
}

/// Pick the tag line for `monitor` out of `mmsg -g -t` output.
///
/// With a monitor filter the line whose first field equals the filter is
/// used, wherever it appears. Without one the first `<mon> tags ...` line wins,
/// whichever monitor that happens to be. Scanning stops at the selected line
/// even if its masks turn out to be malformed.
pub fn parse_tag_lines(output: &str, monitor: Option<&str>) -> Result<TagMasks, ParseError> {
    for line in output.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 || parts[1] != "tags" {
            continue;
        }
        if let Some(wanted) = monitor
            && parts[0] != wanted
        {
            continue;
        }

        return Ok(TagMasks {
            occupied: parse_mask(parts[2])?,
            active: parse_mask(parts[3])?,
        });
    }

    Err(ParseError::NoTagLine)
}

/// Parse the output of `mmsg -g -c`.
///
/// Empty output means nothing is focused. The app id is the last
/// space-separated word; everything before it is the title, which may itself
/// contain spaces. A single word is taken as a title with no app id.
pub fn parse_client(output: &str) -> Option<FocusedClient> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return None;
    }

    let client = match trimmed.rsplit_once(' ') {
        Some((title, app_id)) => FocusedClient::new(title, app_id),
        None => FocusedClient::new(trimmed, ""),
    };
    Some(client)
}

/// Parse the output of `mmsg -g -l`. The layout is kept verbatim.
pub fn parse_layout(output: &str) -> Option<String> {
    let trimmed = output.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
