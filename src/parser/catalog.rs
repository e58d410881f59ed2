use tracing::debug;

use super::node::{DocumentTree, SectionNode};
use super::section;
use super::Endpoint;

/// Records found in one document, before dedup and ordering.
#[derive(Debug, Default)]
pub struct Scan {
    /// Section containers visited, valid or not.
    pub sections: usize,
    pub endpoints: Vec<Endpoint>,
}

/// Run the section extractor over every section container, in document order.
pub fn build<D: DocumentTree>(doc: &D) -> Scan {
    let sections = doc.sections();
    let mut endpoints = Vec::with_capacity(sections.len());

    for node in &sections {
        let Some(section_id) = node.attr("id").filter(|id| !id.is_empty()) else {
            debug!("skipping section without identifier");
            continue;
        };
        if let Some(endpoint) = section::extract(node, section_id) {
            endpoints.push(endpoint);
        }
    }

    debug!(sections = sections.len(), valid = endpoints.len(), "scanned document");
    Scan {
        sections: sections.len(),
        endpoints,
    }
}

// ── Tests ──
