//! Text formatting helpers shared by the views and the description document

use chrono::{DateTime, Utc};

const ELLIPSIS: &str = "...";

/// Truncate to at most `max` characters, ending with `...` when cut.
///
/// Counts characters, not bytes, so multi-byte titles never split.
pub fn truncate_string(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max > ELLIPSIS.len() {
        let kept: String = s.chars().take(max - ELLIPSIS.len()).collect();
        format!("{kept}{ELLIPSIS}")
    } else {
        s.chars().take(max).collect()
    }
}

/// Age of a timestamp as `<days>d <hours>h ago`.
///
/// Timestamps in the future render as `0d 0h ago`.
pub fn time_since(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - created).max(chrono::Duration::zero());
    let days = elapsed.num_days();
    let hours = elapsed.num_hours() % 24;
    format!("{days}d {hours}h ago")
}

/// Prefix every line with `- `.
pub fn bullet_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
