use tracing::debug;

use super::node::{Probe, SectionNode};
use super::pointer;
use super::Endpoint;

/// Tag used when the identifier carries no tag segment.
pub const UNKNOWN_TAG: &str = "Unknown";

/// Identifiers shorter than this never feed the path fallback.
const MIN_FALLBACK_SEGMENTS: usize = 4;

/// Derive an endpoint from one section, best effort.
///
/// Missing elements degrade to empty strings; the section only yields a
/// record when both a method and a path were found, the path possibly
/// decoded from the second-to-last identifier segment
/// (`tag/Report/paths/~1v1~1api~1x/get` gives `/v1/api/x`).
pub fn extract<N: SectionNode>(section: &N, section_id: &str) -> Option<Endpoint> {
    if section_id.is_empty() {
        return None;
    }
    let segments: Vec<&str> = section_id.split('/').collect();

    let tag = segments
        .get(1)
        .filter(|s| !s.is_empty())
        .map_or(UNKNOWN_TAG, |s| *s)
        .to_string();

    let badge = section.query(Probe::Method);
    let method = badge
        .as_ref()
        .map(|b| b.text_content().trim().to_uppercase())
        .unwrap_or_default();

    let mut path = badge
        .as_ref()
        .and_then(|b| b.next_element_sibling())
        .map(|s| s.text_content().trim().to_string())
        .unwrap_or_default();

    if path.is_empty() && segments.len() >= MIN_FALLBACK_SEGMENTS {
        path = pointer::decode(segments[segments.len() - 2]);
    }

    let summary = section
        .query(Probe::Summary)
        .map(|h| h.text_content().trim().to_string())
        .unwrap_or_default();

    let description = section
        .query(Probe::Description)
        .map(|p| p.text_content().trim().to_string());

    if method.is_empty() || path.is_empty() {
        debug!(section_id, %method, %path, "dropping incomplete section");
        return None;
    }

    Some(Endpoint {
        tag,
        method,
        path,
        summary,
        description,
        section_id: section_id.to_string(),
    })
}

// ── Tests ──
