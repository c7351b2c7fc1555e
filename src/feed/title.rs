//! Item title composition.

use super::types::FALLBACK_TITLE;

/// Label for an upstream event-type code, if it is one we show.
pub fn event_label(code: i64) -> Option<&'static str> {
    match code {
        0 => Some("Launch date"),
        1 => Some("Campaign start"),
        3 => Some("New project"),
        6 => Some("24 hours left"),
        _ => None,
    }
}

/// Build an item title.
///
/// Display title and bracketed event label are joined with a space. When both
/// are missing the display text is used, then [`FALLBACK_TITLE`].
pub fn compose_title(
    display_title: Option<&str>,
    event_type: Option<i64>,
    display_text: Option<&str>,
) -> String {
    let mut bits: Vec<String> = Vec::with_capacity(2);

    if let Some(title) = display_title.filter(|t| !t.is_empty()) {
        bits.push(title.to_string());
    }
    if let Some(label) = event_type.and_then(event_label) {
        bits.push(format!("[{label}]"));
    }

    if !bits.is_empty() {
        return bits.join(" ");
    }

    display_text
        .filter(|t| !t.is_empty())
        .unwrap_or(FALLBACK_TITLE)
        .to_string()
}
