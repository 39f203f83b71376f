//! Thin query layer over a parsed HTML tree.
//!
//! Extractors only ever need three things from markup: select nodes by a CSS
//! pattern, read trimmed text, and read an attribute. Each parse produces an
//! independent [`Document`]; nested markup (such as a fragment stored inside an
//! attribute) is parsed into a second, separate instance.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

fn parse_selector(pattern: &str) -> Option<Selector> {
    match Selector::parse(pattern) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!(selector = %pattern, error = ?e, "Invalid selector");
            None
        }
    }
}

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// All elements matching `pattern`, in document order.
    pub fn select(&self, pattern: &str) -> Vec<Node<'_>> {
        let Some(sel) = parse_selector(pattern) else {
            return Vec::new();
        };
        self.html.select(&sel).map(Node).collect()
    }

    /// Concatenated text of every match, trimmed.
    pub fn text(&self, pattern: &str) -> String {
        self.select(pattern)
            .iter()
            .map(Node::text)
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Trimmed text of the first match only.
    pub fn first_text(&self, pattern: &str) -> String {
        self.select(pattern)
            .first()
            .map(|n| n.text().trim().to_string())
            .unwrap_or_default()
    }

    /// Attribute of the first match, if that element carries it.
    pub fn attr(&self, pattern: &str, name: &str) -> Option<String> {
        self.select(pattern)
            .first()
            .and_then(|n| n.attr(name))
            .map(str::to_string)
    }
}

/// A borrowed element inside a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    /// Raw concatenated text of this element and its descendants.
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    pub fn find(&self, pattern: &str) -> Vec<Node<'a>> {
        let Some(sel) = parse_selector(pattern) else {
            return Vec::new();
        };
        self.0.select(&sel).map(Node).collect()
    }

    /// Concatenated text of every descendant match, trimmed.
    pub fn find_text(&self, pattern: &str) -> String {
        self.find(pattern)
            .iter()
            .map(Node::text)
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Trimmed text of the first descendant match.
    pub fn find_first_text(&self, pattern: &str) -> String {
        self.find(pattern)
            .first()
            .map(|n| n.text().trim().to_string())
            .unwrap_or_default()
    }

    /// Attribute of the first descendant match.
    pub fn find_attr(&self, pattern: &str, name: &str) -> Option<&'a str> {
        self.find(pattern).first().and_then(|n| n.attr(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"<html><body>
        <h1 class="t"> Alpha </h1><h1 class="t">Beta</h1>
        <div class="card"><a href="/x">link</a><img src="a.png"><img src="b.png"></div>
    </body></html>"#;

    #[test]
    fn text_concatenates_all_matches() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.text("h1.t"), "Alpha Beta");
        assert_eq!(doc.first_text("h1.t"), "Alpha");
    }

    #[test]
    fn attr_reads_first_match() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.attr("img", "src").as_deref(), Some("a.png"));
        assert_eq!(doc.attr("img", "alt"), None);
        assert_eq!(doc.attr("video", "src"), None);
    }

    #[test]
    fn node_queries_are_scoped() {
        let doc = Document::parse(PAGE);
        let cards = doc.select(".card");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].find_attr("a", "href"), Some("/x"));
        assert_eq!(cards[0].find_text("a"), "link");
        assert_eq!(cards[0].find_text("h1"), "");
    }

    #[test]
    fn invalid_selector_yields_nothing() {
        let doc = Document::parse(PAGE);
        assert!(doc.select("[[[").is_empty());
        assert_eq!(doc.text("[[["), "");
    }
}
