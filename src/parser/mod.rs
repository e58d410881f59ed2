pub mod catalog;
pub mod dedupe;
pub mod node;
pub mod order;
pub mod pointer;
pub mod section;

use serde::Serialize;

use node::DocumentTree;

/// One documented API operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub tag: String,
    pub method: String,
    pub path: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Identifier of the section the record came from.
    pub section_id: String,
}

impl Endpoint {
    /// `"METHOD path"`, the identity used for dedup.
    pub fn identity_key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Extraction result for one document.
#[derive(Debug)]
pub struct Catalog {
    pub sections: usize,
    /// Records that passed validation, duplicates included.
    pub valid: usize,
    /// Unique records in canonical order.
    pub endpoints: Vec<Endpoint>,
}

/// Three-pass pipeline: sections → valid records → unique records in canonical order.
pub fn process_document<D: DocumentTree>(doc: &D) -> Catalog {
    let scan = catalog::build(doc);
    let valid = scan.endpoints.len();
    let endpoints = order::sort(dedupe::dedupe(scan.endpoints));
    Catalog {
        sections: scan.sections,
        valid,
        endpoints,
    }
}

// ── Tests ──
