use crate::db::sheet::SheetLayout;
use serde::Serialize;

const USERNAME_SLOT: usize = 0;
const AVATAR_URL_SLOT: usize = 1;
const ENABLED_SLOT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookMessage {
    pub username: String,
    pub avatar_url: String,
    pub content: String,
    pub tts: bool,
}

/// One message per recipient block that has a username, an avatar and an
/// enabled marker.
pub fn build_messages(
    cells: &[String],
    layout: &SheetLayout,
    video_url: &str,
) -> Vec<WebhookMessage> {
    (layout.recipients_start..cells.len())
        .step_by(layout.recipients_stride.max(1))
        .filter_map(|start| {
            let username = slot(cells, start + USERNAME_SLOT);
            let avatar_url = slot(cells, start + AVATAR_URL_SLOT);
            if username.is_empty()
                || avatar_url.is_empty()
                || !is_enabled(slot(cells, start + ENABLED_SLOT))
            {
                return None;
            }

            Some(WebhookMessage {
                username: username.to_string(),
                avatar_url: avatar_url.to_string(),
                content: video_url.to_string(),
                tts: false,
            })
        })
        .collect()
}

fn slot(cells: &[String], index: usize) -> &str {
    cells.get(index).map(|cell| cell.trim()).unwrap_or("")
}

/// Unchecked sheet checkboxes export as `FALSE` or `0`.
fn is_enabled(marker: &str) -> bool {
    !(marker.is_empty() || marker == "0" || marker.eq_ignore_ascii_case("false"))
}
