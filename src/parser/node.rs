//! Node-query capability the extractor runs against.
//!
//! The extractor never touches `scraper` directly: it asks a [`SectionNode`] for
//! one of a few [`Probe`]s, reads text and attributes, and steps to the next
//! element sibling. [`HtmlDocument`] answers those queries over a parsed page,
//! and tests can answer them from plain structs.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Elements the extractor looks up inside a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Inline badge whose text is the HTTP verb.
    Method,
    /// First heading of the section.
    Summary,
    /// First paragraph nested in a generic container.
    Description,
}

pub trait SectionNode: Sized {
    /// First descendant matching `probe`, in document order.
    fn query(&self, probe: Probe) -> Option<Self>;
    /// Concatenated text of every descendant text node, untrimmed.
    fn text_content(&self) -> String;
    fn attr(&self, name: &str) -> Option<&str>;
    fn next_element_sibling(&self) -> Option<Self>;
}

pub trait DocumentTree {
    type Node: SectionNode;

    /// Every section container, in document order.
    fn sections(&self) -> Vec<Self::Node>;
}

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("invalid {role} selector {selector:?}: {reason}")]
    Selector {
        role: &'static str,
        selector: String,
        reason: String,
    },
    #[error("section prefix must not be empty")]
    EmptyPrefix,
}

/// Markup conventions of the rendered documentation site, compiled once.
#[derive(Debug, Clone)]
pub struct Markup {
    section_prefix: String,
    with_id: Selector,
    method: Selector,
    summary: Selector,
    description: Selector,
}

impl Markup {
    pub fn new(
        section_prefix: &str,
        method: &str,
        summary: &str,
        description: &str,
    ) -> Result<Self, MarkupError> {
        if section_prefix.is_empty() {
            return Err(MarkupError::EmptyPrefix);
        }
        Ok(Self {
            section_prefix: section_prefix.to_string(),
            with_id: compile("section", "[id]")?,
            method: compile("method", method)?,
            summary: compile("summary", summary)?,
            description: compile("description", description)?,
        })
    }

    pub fn section_prefix(&self) -> &str {
        &self.section_prefix
    }

    /// Whether the page already shows at least one section container.
    pub fn has_sections(&self, html: &Html) -> bool {
        HtmlDocument::new(html, self).section_elements().next().is_some()
    }

    fn selector(&self, probe: Probe) -> &Selector {
        match probe {
            Probe::Method => &self.method,
            Probe::Summary => &self.summary,
            Probe::Description => &self.description,
        }
    }
}

fn compile(role: &'static str, selector: &str) -> Result<Selector, MarkupError> {
    Selector::parse(selector).map_err(|e| MarkupError::Selector {
        role,
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// A parsed page viewed through a [`Markup`].
pub struct HtmlDocument<'a> {
    html: &'a Html,
    markup: &'a Markup,
}

impl<'a> HtmlDocument<'a> {
    pub fn new(html: &'a Html, markup: &'a Markup) -> Self {
        Self { html, markup }
    }

    fn section_elements(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let (html, markup) = (self.html, self.markup);
        let prefix = markup.section_prefix.as_str();
        html.select(&markup.with_id)
            .filter(move |el| el.value().id().is_some_and(|id| id.starts_with(prefix)))
    }
}

impl<'a> DocumentTree for HtmlDocument<'a> {
    type Node = HtmlNode<'a>;

    fn sections(&self) -> Vec<HtmlNode<'a>> {
        self.section_elements()
            .map(|el| HtmlNode {
                el,
                markup: self.markup,
            })
            .collect()
    }
}

#[derive(Clone, Copy)]
pub struct HtmlNode<'a> {
    el: ElementRef<'a>,
    markup: &'a Markup,
}

impl<'a> SectionNode for HtmlNode<'a> {
    fn query(&self, probe: Probe) -> Option<Self> {
        self.el
            .select(self.markup.selector(probe))
            .next()
            .map(|el| HtmlNode {
                el,
                markup: self.markup,
            })
    }

    fn text_content(&self) -> String {
        self.el.text().collect()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.el.value().attr(name)
    }

    fn next_element_sibling(&self) -> Option<Self> {
        self.el
            .next_siblings()
            .find_map(ElementRef::wrap)
            .map(|el| HtmlNode {
                el,
                markup: self.markup,
            })
    }
}

// ── Tests ──
