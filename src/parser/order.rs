use std::cmp::Ordering;

use feruca::{Collator, Tailoring};

use super::Endpoint;

/// Sort into canonical order: tag, then path, then method.
pub fn sort(mut endpoints: Vec<Endpoint>) -> Vec<Endpoint> {
    let mut collator = root_collator();
    // sort_by is stable, so fully equal keys keep their input order
    endpoints.sort_by(|a, b| canonical_cmp(&mut collator, a, b));
    endpoints
}

pub fn canonical_cmp(collator: &mut Collator, a: &Endpoint, b: &Endpoint) -> Ordering {
    collator
        .collate(a.tag.as_str(), b.tag.as_str())
        .then_with(|| collator.collate(a.path.as_str(), b.path.as_str()))
        .then_with(|| collator.collate(a.method.as_str(), b.method.as_str()))
}

/// CLDR root collation with punctuation weighted like any other character,
/// the way `localeCompare` orders strings. Full ties fall back to byte order.
fn root_collator() -> Collator {
    Collator::new(Tailoring::default(), false, true)
}

// ── Tests ──
