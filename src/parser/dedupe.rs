use std::collections::HashSet;

use super::Endpoint;

/// Keep the first record seen for each identity key, in input order.
///
/// Later duplicates are dropped whole; their fields are never merged in.
pub fn dedupe(endpoints: Vec<Endpoint>) -> Vec<Endpoint> {
    let mut seen = HashSet::new();
    endpoints
        .into_iter()
        .filter(|ep| seen.insert(ep.identity_key()))
        .collect()
}

// ── Tests ──
